#![forbid(unsafe_code)]

pub mod term;
pub mod views;
pub mod vm;

pub use term::{TerminalApp, UiError};
