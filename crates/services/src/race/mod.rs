mod progress;
mod service;
mod summary;
mod view;

// Public API of the race subsystem.
pub use progress::RaceProgress;
pub use service::{RaceService, RaceSession};
pub use summary::{RunOutcome, RunSummary};
pub use view::Screen;
