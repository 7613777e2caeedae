use marathon_core::model::{Course, Distance};

/// Where the runner is on the course, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RaceProgress {
    /// 1-based number of the question being shown.
    pub question_number: usize,
    pub total_questions: usize,
    pub distance: Distance,
    pub remaining: Distance,
    pub percent_complete: u8,
}

impl RaceProgress {
    /// Progress at the question stored at `index`, or `None` past the end.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn at(course: &Course, index: usize) -> Option<Self> {
        let question = course.get(index)?;
        let distance = question.distance();
        let length = course.length().meters().max(1);
        let percent = u64::from(distance.meters().min(length)) * 100 / u64::from(length);
        Some(Self {
            question_number: index + 1,
            total_questions: course.len(),
            distance,
            remaining: course.length().saturating_sub(distance),
            percent_complete: percent as u8,
        })
    }
}
