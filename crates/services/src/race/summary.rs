use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use marathon_core::engine::{FinishReport, GameOverReport};
use marathon_core::model::Distance;
use marathon_core::rules::{Accuracy, Medal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Finished { medal: Medal },
    GameOver,
}

/// Record of one finished or abandoned attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub attempt: u32,
    pub outcome: RunOutcome,
    pub score: u32,
    pub accuracy: Accuracy,
    pub stamina: u8,
    pub reached: Distance,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl RunSummary {
    pub(crate) fn finished(
        run_id: Uuid,
        attempt: u32,
        report: &FinishReport,
        finish_line: Distance,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            run_id,
            attempt,
            outcome: RunOutcome::Finished {
                medal: report.medal,
            },
            score: report.score,
            accuracy: report.accuracy,
            stamina: report.stamina,
            reached: finish_line,
            started_at,
            completed_at,
        }
    }

    pub(crate) fn game_over(
        run_id: Uuid,
        attempt: u32,
        report: &GameOverReport,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            run_id,
            attempt,
            outcome: RunOutcome::GameOver,
            score: report.score,
            accuracy: Accuracy::new(report.correct_count, report.total_answered),
            stamina: 0,
            reached: report.reached,
            started_at,
            completed_at,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.outcome, RunOutcome::Finished { .. })
    }

    #[must_use]
    pub fn medal(&self) -> Option<Medal> {
        match self.outcome {
            RunOutcome::Finished { medal } => Some(medal),
            RunOutcome::GameOver => None,
        }
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.completed_at - self.started_at
    }
}

/// Highest-scoring finished run; the earliest one wins a tie.
pub(crate) fn best_finished(runs: &[RunSummary]) -> Option<&RunSummary> {
    runs.iter()
        .filter(|run| run.is_finished())
        .fold(None, |best: Option<&RunSummary>, run| match best {
            Some(b) if b.score >= run.score => Some(b),
            _ => Some(run),
        })
}
