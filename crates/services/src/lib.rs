#![forbid(unsafe_code)]

pub mod error;
pub mod race;

pub use marathon_core::Clock;

pub use error::RaceError;
pub use race::{
    RaceProgress, RaceService, RaceSession, RunOutcome, RunSummary, Screen,
};
