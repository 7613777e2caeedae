//! Quiz progression state machine.
//!
//! ```text
//! Start ──start──▶ InProgress ──advance──▶ InProgress
//!                      │  ▲
//!            advance   │  │ retry
//!                      ▼  │
//!             GameOver / Finished
//! ```

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::model::{
    AidStation, AnswerIndex, AnswerRecord, AppliedDelta, Course, Distance, Question, QuestionId,
    SessionState,
};
use crate::rules::{Accuracy, Medal, MedalPolicy};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Rejected actions. None of them mutate the session.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("race already started")]
    AlreadyStarted,

    #[error("race is not in progress")]
    NotInProgress,

    #[error("race is not over yet; retry is only available after it ends")]
    NotTerminal,

    #[error("option index {index} is out of range (0-3)")]
    InvalidOption { index: usize },

    #[error("question {0} was already answered")]
    AlreadyAnswered(QuestionId),

    #[error("question {0} has not been answered yet")]
    NotAnswered(QuestionId),
}

//
// ─── REPORTS ───────────────────────────────────────────────────────────────────
//

/// What the presentation layer needs after an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerOutcome {
    pub question: QuestionId,
    pub selected: AnswerIndex,
    pub correct: AnswerIndex,
    pub is_correct: bool,
    pub applied: AppliedDelta,
    pub score: u32,
    pub stamina: u8,
    pub aid_station: Option<AidStation>,
    pub landmark: Option<String>,
}

/// Stamina ran out before the finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameOverReport {
    pub score: u32,
    pub correct_count: u32,
    pub total_answered: u32,
    pub reached: Distance,
}

/// The last question was answered with stamina left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FinishReport {
    pub score: u32,
    pub accuracy: Accuracy,
    pub stamina: u8,
    pub medal: Medal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum RacePhase {
    Start,
    InProgress,
    GameOver(GameOverReport),
    Finished(FinishReport),
}

impl RacePhase {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, RacePhase::GameOver(_) | RacePhase::Finished(_))
    }
}

/// Result of `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Continue { index: usize },
    GameOver(GameOverReport),
    Finished(FinishReport),
}

//
// ─── ENGINE ────────────────────────────────────────────────────────────────────
//

/// Owns one session over a shared course and applies the four player actions.
#[derive(Debug, Clone)]
pub struct ProgressionEngine {
    course: Arc<Course>,
    policy: MedalPolicy,
    phase: RacePhase,
    state: SessionState,
    last_outcome: Option<AnswerOutcome>,
}

impl ProgressionEngine {
    #[must_use]
    pub fn new(course: Arc<Course>, policy: MedalPolicy) -> Self {
        Self {
            course,
            policy,
            phase: RacePhase::Start,
            state: SessionState::fresh(),
            last_outcome: None,
        }
    }

    #[must_use]
    pub fn course(&self) -> &Course {
        &self.course
    }

    #[must_use]
    pub fn medal_policy(&self) -> MedalPolicy {
        self.policy
    }

    #[must_use]
    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The question being shown, or `None` outside of a running race.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            RacePhase::InProgress => self.course.get(self.state.current_index()),
            _ => None,
        }
    }

    /// Outcome of the answer to the current question, once given.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&AnswerOutcome> {
        self.last_outcome.as_ref()
    }

    /// # Errors
    ///
    /// Returns `EngineError::AlreadyStarted` outside of the start screen.
    pub fn start(&mut self) -> Result<(), EngineError> {
        if self.phase != RacePhase::Start {
            return Err(EngineError::AlreadyStarted);
        }
        self.reset();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `EngineError::NotTerminal` unless the race ended.
    pub fn retry(&mut self) -> Result<(), EngineError> {
        if !self.phase.is_terminal() {
            return Err(EngineError::NotTerminal);
        }
        self.reset();
        Ok(())
    }

    /// Scores `selected` against the current question.
    ///
    /// # Errors
    ///
    /// Returns `EngineError` if the race is not running, the question was already
    /// answered, or `selected` is not an option index. State is left untouched.
    pub fn submit_answer(&mut self, selected: usize) -> Result<&AnswerOutcome, EngineError> {
        let question = self.current_question().ok_or(EngineError::NotInProgress)?;
        if self.state.current_answered() {
            return Err(EngineError::AlreadyAnswered(question.id()));
        }
        let selected =
            AnswerIndex::new(selected).map_err(|_| EngineError::InvalidOption { index: selected })?;

        let is_correct = question.is_correct(selected);
        let record = AnswerRecord {
            question: question.id(),
            selected,
            is_correct,
        };
        let correct = question.correct();
        let aid_station = question.aid_station().cloned();
        let landmark = question.landmark().map(str::to_string);

        let applied = self.state.record(record);
        log::debug!(
            "{}: picked {} ({}), score {} stamina {}",
            record.question,
            selected,
            if is_correct { "correct" } else { "wrong" },
            self.state.score(),
            self.state.stamina()
        );

        let outcome = self.last_outcome.insert(AnswerOutcome {
            question: record.question,
            selected,
            correct,
            is_correct,
            applied,
            score: self.state.score(),
            stamina: self.state.stamina(),
            aid_station,
            landmark,
        });
        Ok(&*outcome)
    }

    /// Moves past an answered question.
    ///
    /// Exhausted stamina wins over reaching the last question.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NotInProgress` or `EngineError::NotAnswered`.
    pub fn advance(&mut self) -> Result<Transition, EngineError> {
        let question = self.current_question().ok_or(EngineError::NotInProgress)?;
        if !self.state.current_answered() {
            return Err(EngineError::NotAnswered(question.id()));
        }

        if self.state.is_exhausted() {
            let report = GameOverReport {
                score: self.state.score(),
                correct_count: self.state.correct_count(),
                total_answered: self.state.total_answered(),
                reached: question.distance(),
            };
            self.phase = RacePhase::GameOver(report);
            return Ok(Transition::GameOver(report));
        }

        if self.state.current_index() >= self.course.last_index() {
            let accuracy = self.state.accuracy();
            let report = FinishReport {
                score: self.state.score(),
                accuracy,
                stamina: self.state.stamina(),
                medal: self.policy.medal_for(accuracy),
            };
            self.phase = RacePhase::Finished(report);
            return Ok(Transition::Finished(report));
        }

        self.state.step_forward();
        self.last_outcome = None;
        Ok(Transition::Continue {
            index: self.state.current_index(),
        })
    }

    fn reset(&mut self) {
        self.state = SessionState::fresh();
        self.last_outcome = None;
        self.phase = RacePhase::InProgress;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
