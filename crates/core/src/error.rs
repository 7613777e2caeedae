use thiserror::Error;

use crate::engine::EngineError;
use crate::model::{CourseError, QuestionError};
use crate::rules::RulesError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
