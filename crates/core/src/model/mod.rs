mod course;
mod ids;
mod question;
mod session;

pub use course::{COURSE_LENGTH, Course, CourseError};
pub use ids::QuestionId;
pub use question::{
    AidStation, AnswerIndex, Category, Distance, OPTION_COUNT, Question, QuestionDraft,
    QuestionError,
};
pub use session::{AnswerRecord, AppliedDelta, SessionState};
