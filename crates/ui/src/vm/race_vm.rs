use services::{RaceError, RaceSession, Screen};

/// The player actions the presentation can forward, plus leaving the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaceIntent {
    Start,
    /// Zero-based option index.
    Answer(usize),
    Next,
    Retry,
    Quit,
}

impl RaceIntent {
    /// Reads one line of player input in the context of the current screen.
    ///
    /// Digits are mapped to option indexes as typed (`"1"` is option 0); range
    /// checks are left to the engine so rejections share one path.
    #[must_use]
    pub fn parse(input: &str, screen: &Screen<'_>) -> Option<Self> {
        let input = input.trim().to_ascii_lowercase();
        if input == "q" || input == "quit" {
            return Some(Self::Quit);
        }
        match screen {
            Screen::Start { .. } => {
                matches!(input.as_str(), "" | "s" | "start").then_some(Self::Start)
            }
            Screen::Question { outcome: None, .. } => input
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .map(Self::Answer),
            Screen::Question { outcome: Some(_), .. } => {
                matches!(input.as_str(), "" | "n" | "next").then_some(Self::Next)
            }
            Screen::GameOver { .. } | Screen::Finished { .. } => {
                matches!(input.as_str(), "r" | "retry").then_some(Self::Retry)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaceFlow {
    Continue,
    Quit,
}

pub struct RaceVm {
    session: RaceSession,
}

impl RaceVm {
    #[must_use]
    pub fn new(session: RaceSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &RaceSession {
        &self.session
    }

    #[must_use]
    pub fn into_session(self) -> RaceSession {
        self.session
    }

    #[must_use]
    pub fn screen(&self) -> Screen<'_> {
        self.session.screen()
    }

    /// # Errors
    ///
    /// Returns the service error for rejected actions; the session is unchanged.
    pub fn apply(&mut self, intent: RaceIntent) -> Result<RaceFlow, RaceError> {
        match intent {
            RaceIntent::Start => self.session.start()?,
            RaceIntent::Answer(index) => {
                self.session.submit_answer(index)?;
            }
            RaceIntent::Next => {
                self.session.advance()?;
            }
            RaceIntent::Retry => self.session.retry()?,
            RaceIntent::Quit => return Ok(RaceFlow::Quit),
        }
        Ok(RaceFlow::Continue)
    }
}
