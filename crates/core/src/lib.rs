#![forbid(unsafe_code)]

pub mod course_data;
pub mod engine;
pub mod error;
pub mod model;
pub mod rules;
pub mod time;

pub use error::Error;
pub use time::Clock;
