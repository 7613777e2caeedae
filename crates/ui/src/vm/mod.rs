mod question_vm;
mod race_vm;
mod result_vm;
mod time_fmt;

pub use question_vm::{FeedbackVm, OptionMark, OptionVm, QuestionVm, stamina_bar};
pub use race_vm::{RaceFlow, RaceIntent, RaceVm};
pub use result_vm::ResultVm;
pub use time_fmt::format_elapsed;
