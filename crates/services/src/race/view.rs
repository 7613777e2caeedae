use marathon_core::engine::{AnswerOutcome, FinishReport, GameOverReport};
use marathon_core::model::{Course, Question, SessionState};

use super::progress::RaceProgress;
use super::summary::RunSummary;

/// Read-only snapshot of everything the presentation layer may show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Screen<'a> {
    Start {
        course: &'a Course,
    },
    Question {
        question: &'a Question,
        state: &'a SessionState,
        progress: RaceProgress,
        /// Set once the question has been answered.
        outcome: Option<&'a AnswerOutcome>,
    },
    GameOver {
        report: GameOverReport,
        summary: Option<&'a RunSummary>,
    },
    Finished {
        report: FinishReport,
        summary: Option<&'a RunSummary>,
        personal_best: Option<&'a RunSummary>,
    },
}

impl Screen<'_> {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Screen::GameOver { .. } | Screen::Finished { .. })
    }
}
