use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use marathon_core::engine::{AnswerOutcome, ProgressionEngine, RacePhase, Transition};
use marathon_core::model::Course;
use marathon_core::rules::MedalPolicy;

use super::progress::RaceProgress;
use super::summary::{RunSummary, best_finished};
use super::view::Screen;
use crate::Clock;
use crate::error::RaceError;

//
// ─── SERVICE ───────────────────────────────────────────────────────────────────
//

/// Shared race configuration. Hands out independent sessions.
#[derive(Debug, Clone)]
pub struct RaceService {
    course: Arc<Course>,
    clock: Clock,
    policy: MedalPolicy,
}

impl RaceService {
    #[must_use]
    pub fn new(course: Arc<Course>) -> Self {
        Self {
            course,
            clock: Clock::system(),
            policy: MedalPolicy::default(),
        }
    }

    /// Service over the compiled-in course.
    ///
    /// # Errors
    ///
    /// Returns `RaceError::Course` if the built-in table is malformed.
    pub fn standard() -> Result<Self, RaceError> {
        Ok(Self::new(Arc::new(Course::standard()?)))
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn with_medal_policy(mut self, policy: MedalPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn course(&self) -> &Arc<Course> {
        &self.course
    }

    #[must_use]
    pub fn medal_policy(&self) -> MedalPolicy {
        self.policy
    }

    #[must_use]
    pub fn new_session(&self) -> RaceSession {
        RaceSession {
            engine: ProgressionEngine::new(Arc::clone(&self.course), self.policy),
            clock: self.clock,
            run_id: Uuid::new_v4(),
            attempt: 0,
            started_at: None,
            runs: Vec::new(),
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One player's race, across retries.
///
/// Wraps a `ProgressionEngine` and stamps every attempt with an id, a clock
/// reading and a `RunSummary` once it ends.
pub struct RaceSession {
    engine: ProgressionEngine,
    clock: Clock,
    run_id: Uuid,
    attempt: u32,
    started_at: Option<DateTime<Utc>>,
    runs: Vec<RunSummary>,
}

impl RaceSession {
    #[must_use]
    pub fn engine(&self) -> &ProgressionEngine {
        &self.engine
    }

    #[must_use]
    pub fn phase(&self) -> RacePhase {
        self.engine.phase()
    }

    #[must_use]
    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    /// 1-based attempt number; 0 before the first start.
    #[must_use]
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Summaries of every attempt that ended, oldest first.
    #[must_use]
    pub fn runs(&self) -> &[RunSummary] {
        &self.runs
    }

    #[must_use]
    pub fn last_run(&self) -> Option<&RunSummary> {
        self.runs.last()
    }

    #[must_use]
    pub fn personal_best(&self) -> Option<&RunSummary> {
        best_finished(&self.runs)
    }

    /// Mutable access to the session clock, for simulations that step time.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn progress(&self) -> Option<RaceProgress> {
        match self.engine.phase() {
            RacePhase::InProgress => {
                RaceProgress::at(self.engine.course(), self.engine.state().current_index())
            }
            _ => None,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen<'_> {
        match self.engine.phase() {
            RacePhase::Start => Screen::Start {
                course: self.engine.course(),
            },
            RacePhase::InProgress => match (self.engine.current_question(), self.progress()) {
                (Some(question), Some(progress)) => Screen::Question {
                    question,
                    state: self.engine.state(),
                    progress,
                    outcome: self.engine.last_outcome(),
                },
                _ => Screen::Start {
                    course: self.engine.course(),
                },
            },
            RacePhase::GameOver(report) => Screen::GameOver {
                report,
                summary: self.last_run(),
            },
            RacePhase::Finished(report) => Screen::Finished {
                report,
                summary: self.last_run(),
                personal_best: self.personal_best(),
            },
        }
    }

    /// # Errors
    ///
    /// Returns `RaceError::Engine` if the race was already started.
    pub fn start(&mut self) -> Result<(), RaceError> {
        self.engine.start()?;
        self.begin_attempt();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RaceError::Engine` unless the current attempt has ended.
    pub fn retry(&mut self) -> Result<(), RaceError> {
        self.engine.retry()?;
        self.run_id = Uuid::new_v4();
        self.begin_attempt();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `RaceError::Engine` for rejected answers; the session is unchanged.
    pub fn submit_answer(&mut self, selected: usize) -> Result<AnswerOutcome, RaceError> {
        match self.engine.submit_answer(selected) {
            Ok(outcome) => Ok(outcome.clone()),
            Err(err) => {
                log::debug!("run {}: answer rejected: {err}", self.run_id);
                Err(err.into())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `RaceError::Engine` if the race is not running or the current
    /// question is unanswered.
    pub fn advance(&mut self) -> Result<Transition, RaceError> {
        let transition = self.engine.advance()?;
        let completed_at = self.clock.now();
        let started_at = self.started_at.unwrap_or(completed_at);

        match &transition {
            Transition::Continue { index } => {
                log::debug!("run {}: moving to question {}", self.run_id, index + 1);
            }
            Transition::GameOver(report) => {
                log::info!(
                    "run {} (attempt {}): out of stamina at {} with {} points",
                    self.run_id,
                    self.attempt,
                    report.reached,
                    report.score
                );
                self.runs.push(RunSummary::game_over(
                    self.run_id,
                    self.attempt,
                    report,
                    started_at,
                    completed_at,
                ));
            }
            Transition::Finished(report) => {
                log::info!(
                    "run {} (attempt {}): finished with {} points, {} medal",
                    self.run_id,
                    self.attempt,
                    report.score,
                    report.medal
                );
                self.runs.push(RunSummary::finished(
                    self.run_id,
                    self.attempt,
                    report,
                    self.engine.course().length(),
                    started_at,
                    completed_at,
                ));
            }
        }

        Ok(transition)
    }

    fn begin_attempt(&mut self) {
        self.attempt += 1;
        self.started_at = Some(self.clock.now());
        log::info!(
            "run {} (attempt {}): started on {}",
            self.run_id,
            self.attempt,
            self.engine.course().name()
        );
    }
}

impl fmt::Debug for RaceSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RaceSession")
            .field("run_id", &self.run_id)
            .field("attempt", &self.attempt)
            .field("phase", &self.engine.phase())
            .field("current_index", &self.engine.state().current_index())
            .field("started_at", &self.started_at)
            .field("runs_len", &self.runs.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use marathon_core::engine::EngineError;
    use marathon_core::rules::Medal;
    use marathon_core::time::{fixed_clock, fixed_now};

    use crate::race::RunOutcome;

    fn service() -> RaceService {
        RaceService::standard().unwrap().with_clock(fixed_clock())
    }

    fn correct(session: &RaceSession) -> usize {
        session
            .engine()
            .current_question()
            .unwrap()
            .correct()
            .value()
    }

    #[test]
    fn start_screen_before_first_attempt() {
        let session = service().new_session();
        assert_eq!(session.attempt(), 0);
        assert!(matches!(session.screen(), Screen::Start { .. }));
        assert!(session.progress().is_none());
    }

    #[test]
    fn question_screen_shows_outcome_after_answer() {
        let mut session = service().new_session();
        session.start().unwrap();
        assert_eq!(session.started_at(), Some(fixed_now()));

        let Screen::Question { outcome, progress, .. } = session.screen() else {
            panic!("expected question screen");
        };
        assert!(outcome.is_none());
        assert_eq!(progress.question_number, 1);

        let i = correct(&session);
        session.submit_answer(i).unwrap();
        let Screen::Question { outcome, state, .. } = session.screen() else {
            panic!("expected question screen");
        };
        assert!(outcome.unwrap().is_correct);
        assert_eq!(state.score(), 10);
    }

    #[test]
    fn finished_run_is_summarised_with_elapsed_time() {
        let mut session = service().new_session();
        session.start().unwrap();
        loop {
            let i = correct(&session);
            session.submit_answer(i).unwrap();
            session.clock_mut().advance(Duration::seconds(10));
            if !matches!(session.advance().unwrap(), Transition::Continue { .. }) {
                break;
            }
        }

        let run = session.last_run().unwrap();
        assert_eq!(run.outcome, RunOutcome::Finished { medal: Medal::Gold });
        assert_eq!(run.attempt, 1);
        assert_eq!(run.reached, session.engine().course().length());
        let questions = i64::try_from(session.engine().course().len()).unwrap();
        assert_eq!(run.elapsed(), Duration::seconds(10 * questions));
        assert_eq!(session.personal_best(), Some(run));
        assert!(matches!(session.screen(), Screen::Finished { .. }));
    }

    #[test]
    fn retry_starts_a_new_attempt_with_new_run_id() {
        let mut session = service().new_session();
        session.start().unwrap();
        let first_id = session.run_id();
        for _ in 0..9 {
            let i = (correct(&session) + 1) % 4;
            session.submit_answer(i).unwrap();
            session.advance().unwrap();
        }
        assert!(matches!(session.screen(), Screen::GameOver { .. }));
        assert!(session.personal_best().is_none());

        session.retry().unwrap();
        assert_eq!(session.attempt(), 2);
        assert_ne!(session.run_id(), first_id);
        assert_eq!(session.engine().state().stamina(), 100);
        assert_eq!(session.runs().len(), 1);
        assert_eq!(session.runs()[0].outcome, RunOutcome::GameOver);
    }

    #[test]
    fn rejected_actions_surface_engine_errors() {
        let mut session = service().new_session();
        let err = session.submit_answer(0).unwrap_err();
        assert!(matches!(err, RaceError::Engine(EngineError::NotInProgress)));
        session.start().unwrap();
        let err = session.submit_answer(9).unwrap_err();
        assert!(matches!(
            err,
            RaceError::Engine(EngineError::InvalidOption { index: 9 })
        ));
        assert_eq!(session.engine().state().total_answered(), 0);
    }

    #[test]
    fn sessions_from_one_service_are_independent() {
        let svc = service();
        let mut a = svc.new_session();
        let b = svc.new_session();
        a.start().unwrap();
        assert!(matches!(b.screen(), Screen::Start { .. }));
    }
}
