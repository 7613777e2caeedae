//! Shared error types for the services crate.

use thiserror::Error;

use marathon_core::engine::EngineError;
use marathon_core::model::CourseError;
use marathon_core::rules::RulesError;

/// Errors emitted by race services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RaceError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Rules(#[from] RulesError),
}
