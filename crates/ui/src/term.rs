use std::io::{self, BufRead, Write};

use thiserror::Error;

use services::RaceSession;

use crate::views::{input_hint, render};
use crate::vm::{RaceFlow, RaceIntent, RaceVm};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UiError {
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Line-based game loop over any reader and writer.
///
/// Stops on `q` or end of input. Rejected input is reported and the loop goes
/// on with the same screen.
pub struct TerminalApp<R, W> {
    vm: RaceVm,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalApp<R, W> {
    #[must_use]
    pub fn new(session: RaceSession, input: R, output: W) -> Self {
        Self {
            vm: RaceVm::new(session),
            input,
            output,
        }
    }

    /// # Errors
    ///
    /// Returns `UiError::Io` if reading input or writing output fails.
    pub fn run(&mut self) -> Result<(), UiError> {
        let mut line = String::new();
        loop {
            let intent = {
                let screen = self.vm.screen();
                write!(self.output, "{}", render(&screen))?;
                write!(self.output, "{} ", input_hint(&screen))?;
                self.output.flush()?;

                line.clear();
                if self.input.read_line(&mut line)? == 0 {
                    writeln!(self.output)?;
                    log::debug!("input closed");
                    break;
                }
                writeln!(self.output)?;
                RaceIntent::parse(&line, &screen)
            };

            let Some(intent) = intent else {
                writeln!(self.output, "! Not a valid choice here: {:?}", line.trim())?;
                continue;
            };
            match self.vm.apply(intent) {
                Ok(RaceFlow::Continue) => {}
                Ok(RaceFlow::Quit) => break,
                Err(err) => writeln!(self.output, "! {err}")?,
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn session(&self) -> &RaceSession {
        self.vm.session()
    }

    #[must_use]
    pub fn into_parts(self) -> (RaceSession, W) {
        (self.vm.into_session(), self.output)
    }
}
