use serde::{Deserialize, Serialize};
use std::fmt;

/// 1-based position of a question on the course.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(u32);

impl QuestionId {
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Id of the question stored at `index` in the course table.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX - 1) + 1)
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_one_based() {
        assert_eq!(QuestionId::from_index(0), QuestionId::new(1));
        assert_eq!(QuestionId::from_index(16).value(), 17);
    }

    #[test]
    fn display_uses_q_prefix() {
        assert_eq!(QuestionId::new(3).to_string(), "Q3");
        assert_eq!(format!("{:?}", QuestionId::new(3)), "QuestionId(3)");
    }
}
