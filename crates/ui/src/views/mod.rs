//! Plain-text screens. Every function here is pure; `term` does the I/O.

mod question;
mod result;
mod start;

use services::Screen;

use crate::vm::{QuestionVm, ResultVm};

pub use question::render_question;
pub use result::render_result;
pub use start::render_start;

/// Renders whatever the session currently shows.
#[must_use]
pub fn render(screen: &Screen<'_>) -> String {
    match screen {
        Screen::Start { course } => render_start(course),
        Screen::Question {
            question,
            state,
            progress,
            outcome,
        } => render_question(&QuestionVm::new(question, state, progress, *outcome)),
        Screen::GameOver { report, summary } => {
            render_result(&ResultVm::game_over(report, *summary))
        }
        Screen::Finished {
            report,
            summary,
            personal_best,
        } => render_result(&ResultVm::finished(report, *summary, *personal_best)),
    }
}

/// One-line prompt telling the player which keys work on this screen.
#[must_use]
pub fn input_hint(screen: &Screen<'_>) -> &'static str {
    match screen {
        Screen::Start { .. } => "Press Enter to start, q to quit.",
        Screen::Question { outcome: None, .. } => "Pick an answer (1-4), q to quit.",
        Screen::Question {
            outcome: Some(o), ..
        } if o.stamina == 0 => "Press Enter to see how far you got.",
        Screen::Question { .. } => "Press Enter to run on.",
        Screen::GameOver { .. } | Screen::Finished { .. } => "r to retry, q to quit.",
    }
}

pub(crate) fn banner(title: &str) -> String {
    format!("== {title} ==")
}
