use serde::Serialize;
use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::{Category, Distance, Question, QuestionError};

/// Full marathon distance: 42.195 km.
pub const COURSE_LENGTH: Distance = Distance::from_meters(42_195);

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course has no questions")]
    Empty,

    #[error("question {id} at {distance} comes before the previous marker at {previous}")]
    OutOfOrder {
        id: QuestionId,
        distance: Distance,
        previous: Distance,
    },

    #[error("last marker is at {last}, course length is {length}")]
    FinishMismatch { last: Distance, length: Distance },

    #[error("question at position {position} carries id {id}")]
    IdMismatch { position: usize, id: QuestionId },

    #[error("invalid question {id}: {source}")]
    Question {
        id: QuestionId,
        #[source]
        source: QuestionError,
    },
}

/// Ordered, validated quiz table for one course.
///
/// Built once and shared read-only between sessions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    name: String,
    length: Distance,
    questions: Vec<Question>,
}

impl Course {
    /// # Errors
    ///
    /// Returns `CourseError` if the table is empty, ids do not follow positions,
    /// markers go backwards, or the last marker is not the finish line.
    pub fn new(
        name: impl Into<String>,
        questions: Vec<Question>,
        length: Distance,
    ) -> Result<Self, CourseError> {
        let Some(last) = questions.last() else {
            return Err(CourseError::Empty);
        };
        if last.distance() != length {
            return Err(CourseError::FinishMismatch {
                last: last.distance(),
                length,
            });
        }

        let mut previous = Distance::ZERO;
        for (position, question) in questions.iter().enumerate() {
            if question.id() != QuestionId::from_index(position) {
                return Err(CourseError::IdMismatch {
                    position,
                    id: question.id(),
                });
            }
            if question.distance() < previous {
                return Err(CourseError::OutOfOrder {
                    id: question.id(),
                    distance: question.distance(),
                    previous,
                });
            }
            previous = question.distance();
        }

        Ok(Self {
            name: name.into(),
            length,
            questions,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn length(&self) -> Distance {
        self.length
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed course; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    #[must_use]
    pub fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }

    /// Questions that come with an aid station.
    pub fn aid_stations(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| q.aid_station().is_some())
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |q| q.category() == category)
    }
}

impl<'a> IntoIterator for &'a Course {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::question::QuestionDraft;

    fn question(position: usize, km: f64) -> Question {
        QuestionDraft {
            distance_km: km,
            category: Category::Course,
            prompt: format!("Marker {km}?"),
            options: vec!["a".into(), "b".into(), "c".into(), "d".into()],
            correct: 1,
            explanation: "because".into(),
            aid_station: Vec::new(),
            landmark: None,
        }
        .validate(QuestionId::from_index(position))
        .unwrap()
    }

    #[test]
    fn accepts_sorted_table_ending_at_finish() {
        let qs = vec![question(0, 0.0), question(1, 10.0), question(2, 10.0), question(3, 42.195)];
        let course = Course::new("Test", qs, COURSE_LENGTH).unwrap();
        assert_eq!(course.len(), 4);
        assert_eq!(course.last_index(), 3);
        assert_eq!(course.get(3).unwrap().distance(), COURSE_LENGTH);
    }

    #[test]
    fn rejects_empty_table() {
        let err = Course::new("Test", Vec::new(), COURSE_LENGTH).unwrap_err();
        assert_eq!(err, CourseError::Empty);
    }

    #[test]
    fn rejects_markers_going_backwards() {
        let qs = vec![question(0, 12.0), question(1, 5.0), question(2, 42.195)];
        let err = Course::new("Test", qs, COURSE_LENGTH).unwrap_err();
        assert!(matches!(err, CourseError::OutOfOrder { .. }));
    }

    #[test]
    fn rejects_table_that_stops_short() {
        let qs = vec![question(0, 0.0), question(1, 40.0)];
        let err = Course::new("Test", qs, COURSE_LENGTH).unwrap_err();
        assert_eq!(
            err,
            CourseError::FinishMismatch {
                last: Distance::from_meters(40_000),
                length: COURSE_LENGTH,
            }
        );
    }

    #[test]
    fn rejects_ids_that_skip_positions() {
        let qs = vec![question(0, 0.0), question(2, 42.195)];
        let err = Course::new("Test", qs, COURSE_LENGTH).unwrap_err();
        assert!(matches!(err, CourseError::IdMismatch { position: 1, .. }));
    }
}
