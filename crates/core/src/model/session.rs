use serde::Serialize;

use crate::model::ids::QuestionId;
use crate::model::question::AnswerIndex;
use crate::rules::{
    Accuracy, CORRECT_POINTS, MAX_STAMINA, STAMINA_COST, STAMINA_RECOVERY, WRONG_PENALTY,
};

/// One entry of the answer history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnswerRecord {
    pub question: QuestionId,
    pub selected: AnswerIndex,
    pub is_correct: bool,
}

/// Changes applied to score and stamina by one answer, after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedDelta {
    pub score: i32,
    pub stamina: i16,
}

/// Mutable state of a single attempt.
///
/// Only the progression engine mutates it; everyone else gets `&SessionState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    current_index: usize,
    score: u32,
    stamina: u8,
    correct_count: u32,
    total_answered: u32,
    history: Vec<AnswerRecord>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::fresh()
    }
}

impl SessionState {
    /// State at the start line: first question, no points, full stamina.
    #[must_use]
    pub fn fresh() -> Self {
        Self {
            current_index: 0,
            score: 0,
            stamina: MAX_STAMINA,
            correct_count: 0,
            total_answered: 0,
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn stamina(&self) -> u8 {
        self.stamina
    }

    #[must_use]
    pub fn correct_count(&self) -> u32 {
        self.correct_count
    }

    #[must_use]
    pub fn total_answered(&self) -> u32 {
        self.total_answered
    }

    #[must_use]
    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    #[must_use]
    pub fn accuracy(&self) -> Accuracy {
        Accuracy::new(self.correct_count, self.total_answered)
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.stamina == 0
    }

    /// Whether the question at `current_index` already has a recorded answer.
    #[must_use]
    pub fn current_answered(&self) -> bool {
        self.history.len() > self.current_index
    }

    /// Scores one answer with saturating arithmetic and appends it to the history.
    pub(crate) fn record(&mut self, record: AnswerRecord) -> AppliedDelta {
        let (score_before, stamina_before) = (self.score, self.stamina);

        if record.is_correct {
            self.score = self.score.saturating_add(CORRECT_POINTS);
            self.stamina = self
                .stamina
                .saturating_add(STAMINA_RECOVERY)
                .min(MAX_STAMINA);
            self.correct_count = self.correct_count.saturating_add(1);
        } else {
            self.score = self.score.saturating_sub(WRONG_PENALTY);
            self.stamina = self.stamina.saturating_sub(STAMINA_COST);
        }
        self.total_answered = self.total_answered.saturating_add(1);
        self.history.push(record);

        AppliedDelta {
            score: signed_diff(self.score, score_before),
            stamina: i16::from(self.stamina) - i16::from(stamina_before),
        }
    }

    pub(crate) fn step_forward(&mut self) {
        self.current_index += 1;
    }
}

fn signed_diff(after: u32, before: u32) -> i32 {
    let diff = i64::from(after) - i64::from(before);
    i32::try_from(diff).unwrap_or(if diff < 0 { i32::MIN } else { i32::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(is_correct: bool) -> AnswerRecord {
        AnswerRecord {
            question: QuestionId::new(1),
            selected: AnswerIndex::new(0).unwrap(),
            is_correct,
        }
    }

    #[test]
    fn fresh_state_starts_at_full_stamina() {
        let state = SessionState::fresh();
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.stamina(), 100);
        assert_eq!(state.total_answered(), 0);
        assert!(!state.current_answered());
    }

    #[test]
    fn correct_answer_at_full_stamina_caps_at_max() {
        let mut state = SessionState::fresh();
        let delta = state.record(answer(true));
        assert_eq!(state.score(), 10);
        assert_eq!(state.stamina(), 100);
        assert_eq!(delta, AppliedDelta { score: 10, stamina: 0 });
    }

    #[test]
    fn wrong_answer_at_zero_score_floors() {
        let mut state = SessionState::fresh();
        let delta = state.record(answer(false));
        assert_eq!(state.score(), 0);
        assert_eq!(state.stamina(), 88);
        assert_eq!(delta, AppliedDelta { score: 0, stamina: -12 });
    }

    #[test]
    fn stamina_floors_at_zero() {
        let mut state = SessionState::fresh();
        for _ in 0..9 {
            state.record(answer(false));
        }
        assert_eq!(state.stamina(), 0);
        assert!(state.is_exhausted());
        let delta = state.record(answer(false));
        assert_eq!(delta.stamina, 0);
        assert_eq!(state.stamina(), 0);
    }

    #[test]
    fn history_tracks_answer_lock() {
        let mut state = SessionState::fresh();
        state.record(answer(true));
        assert!(state.current_answered());
        state.step_forward();
        assert!(!state.current_answered());
        assert_eq!(state.correct_count(), 1);
    }
}
