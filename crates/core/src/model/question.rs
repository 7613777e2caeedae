use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Every question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("distance must be finite and non-negative, got {km} km")]
    InvalidDistance { km: f64 },

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question explanation cannot be empty")]
    EmptyExplanation,

    #[error("expected 4 options, got {len}")]
    OptionCount { len: usize },

    #[error("option {index} is blank")]
    BlankOption { index: usize },

    #[error("correct index {index} is outside 0..4")]
    CorrectIndexOutOfRange { index: usize },

    #[error("answer index {index} is outside 0..4")]
    AnswerOutOfRange { index: usize },

    #[error("aid station must list at least one item")]
    EmptyAidStation,

    #[error("aid station item cannot be blank")]
    BlankAidItem,

    #[error("aid station lists {item:?} twice")]
    DuplicateAidItem { item: String },

    #[error("landmark cannot be blank")]
    BlankLandmark,
}

//
// ─── DISTANCE ──────────────────────────────────────────────────────────────────
//

/// Position on the course, stored in whole metres so markers compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Distance(u32);

impl Distance {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_meters(meters: u32) -> Self {
        Self(meters)
    }

    /// Converts kilometres to a distance, rounding to the nearest metre.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidDistance` for negative, non-finite or
    /// unrepresentable values.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_km(km: f64) -> Result<Self, QuestionError> {
        let meters = (km * 1000.0).round();
        if !km.is_finite() || km < 0.0 || meters > f64::from(u32::MAX) {
            return Err(QuestionError::InvalidDistance { km });
        }
        Ok(Self(meters as u32))
    }

    #[must_use]
    pub fn meters(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn km(self) -> f64 {
        f64::from(self.0) / 1000.0
    }

    #[must_use]
    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 1000;
        let frac = self.0 % 1000;
        if frac == 0 {
            return write!(f, "{whole} km");
        }
        let digits = format!("{frac:03}");
        write!(f, "{whole}.{} km", digits.trim_end_matches('0'))
    }
}

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Rules,
    History,
    Training,
    Nutrition,
    Physiology,
    Course,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Rules,
        Category::History,
        Category::Training,
        Category::Nutrition,
        Category::Physiology,
        Category::Course,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Rules => "Rules",
            Category::History => "History",
            Category::Training => "Training",
            Category::Nutrition => "Nutrition",
            Category::Physiology => "Physiology",
            Category::Course => "Course",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── ANSWER INDEX ──────────────────────────────────────────────────────────────
//

/// Zero-based index of one of the four options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct AnswerIndex(u8);

impl AnswerIndex {
    /// # Errors
    ///
    /// Returns `QuestionError::AnswerOutOfRange` if `index >= 4`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(index: usize) -> Result<Self, QuestionError> {
        if index < OPTION_COUNT {
            Ok(Self(index as u8))
        } else {
            Err(QuestionError::AnswerOutOfRange { index })
        }
    }

    #[must_use]
    pub fn value(self) -> usize {
        usize::from(self.0)
    }

    /// 1-based label shown to players.
    #[must_use]
    pub fn label(self) -> u8 {
        self.0 + 1
    }

    pub fn all() -> impl Iterator<Item = AnswerIndex> {
        (0..OPTION_COUNT as u8).map(AnswerIndex)
    }
}

impl TryFrom<usize> for AnswerIndex {
    type Error = QuestionError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AnswerIndex> for usize {
    fn from(value: AnswerIndex) -> Self {
        value.value()
    }
}

impl fmt::Display for AnswerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

//
// ─── AID STATION ───────────────────────────────────────────────────────────────
//

/// Refreshments handed out at a marker, in the order they are listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AidStation {
    items: Vec<String>,
}

impl AidStation {
    /// # Errors
    ///
    /// Returns `QuestionError` if the list is empty, has blank entries or repeats an item.
    pub fn new<I, S>(items: I) -> Result<Self, QuestionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for item in items {
            let item = item.into().trim().to_string();
            if item.is_empty() {
                return Err(QuestionError::BlankAidItem);
            }
            if out.contains(&item) {
                return Err(QuestionError::DuplicateAidItem { item });
            }
            out.push(item);
        }
        if out.is_empty() {
            return Err(QuestionError::EmptyAidStation);
        }
        Ok(Self { items: out })
    }

    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn offers(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.eq_ignore_ascii_case(name))
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// Unvalidated question as written in a quiz table.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionDraft {
    pub distance_km: f64,
    pub category: Category,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
    pub aid_station: Vec<String>,
    pub landmark: Option<String>,
}

impl QuestionDraft {
    /// Checks the draft and assigns it an id.
    ///
    /// # Errors
    ///
    /// Returns the first `QuestionError` found; nothing is partially built.
    pub fn validate(self, id: QuestionId) -> Result<Question, QuestionError> {
        let distance = Distance::from_km(self.distance_km)?;

        let prompt = self.prompt.trim().to_string();
        if prompt.is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        let explanation = self.explanation.trim().to_string();
        if explanation.is_empty() {
            return Err(QuestionError::EmptyExplanation);
        }

        let len = self.options.len();
        let options: [String; OPTION_COUNT] = self
            .options
            .try_into()
            .map_err(|_| QuestionError::OptionCount { len })?;
        if let Some(index) = options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuestionError::BlankOption { index });
        }

        let correct = AnswerIndex::new(self.correct).map_err(|_| {
            QuestionError::CorrectIndexOutOfRange {
                index: self.correct,
            }
        })?;

        let aid_station = if self.aid_station.is_empty() {
            None
        } else {
            Some(AidStation::new(self.aid_station)?)
        };

        let landmark = match self.landmark {
            Some(text) if text.trim().is_empty() => return Err(QuestionError::BlankLandmark),
            Some(text) => Some(text.trim().to_string()),
            None => None,
        };

        Ok(Question {
            id,
            distance,
            category: self.category,
            prompt,
            options,
            correct,
            explanation,
            aid_station,
            landmark,
        })
    }
}

/// A validated question record at a course marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    id: QuestionId,
    distance: Distance,
    category: Category,
    prompt: String,
    options: [String; OPTION_COUNT],
    correct: AnswerIndex,
    explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    aid_station: Option<AidStation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    landmark: Option<String>,
}

impl Question {
    #[must_use]
    pub fn id(&self) -> QuestionId {
        self.id
    }

    #[must_use]
    pub fn distance(&self) -> Distance {
        self.distance
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: AnswerIndex) -> &str {
        &self.options[index.value()]
    }

    #[must_use]
    pub fn correct(&self) -> AnswerIndex {
        self.correct
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        self.option(self.correct)
    }

    #[must_use]
    pub fn is_correct(&self, selected: AnswerIndex) -> bool {
        selected == self.correct
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn aid_station(&self) -> Option<&AidStation> {
        self.aid_station.as_ref()
    }

    #[must_use]
    pub fn landmark(&self) -> Option<&str> {
        self.landmark.as_deref()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            distance_km: 5.0,
            category: Category::Nutrition,
            prompt: "What do most runners grab first?".into(),
            options: vec!["Water".into(), "Cake".into(), "Coffee".into(), "Soup".into()],
            correct: 0,
            explanation: "Water is at every station.".into(),
            aid_station: vec!["Water".into(), "Sports drink".into()],
            landmark: None,
        }
    }

    #[test]
    fn valid_draft_builds_question() {
        let q = draft().validate(QuestionId::new(3)).unwrap();
        assert_eq!(q.id(), QuestionId::new(3));
        assert_eq!(q.distance(), Distance::from_meters(5_000));
        assert_eq!(q.correct_option(), "Water");
        assert!(q.aid_station().unwrap().offers("sports drink"));
        assert!(q.landmark().is_none());
    }

    #[test]
    fn three_options_are_rejected() {
        let mut d = draft();
        d.options.pop();
        let err = d.validate(QuestionId::new(1)).unwrap_err();
        assert_eq!(err, QuestionError::OptionCount { len: 3 });
    }

    #[test]
    fn correct_index_must_be_in_range() {
        let mut d = draft();
        d.correct = 4;
        let err = d.validate(QuestionId::new(1)).unwrap_err();
        assert_eq!(err, QuestionError::CorrectIndexOutOfRange { index: 4 });
    }

    #[test]
    fn blank_option_and_prompt_are_rejected() {
        let mut d = draft();
        d.options[2] = "  ".into();
        assert_eq!(
            d.validate(QuestionId::new(1)).unwrap_err(),
            QuestionError::BlankOption { index: 2 }
        );

        let mut d = draft();
        d.prompt = String::new();
        assert_eq!(
            d.validate(QuestionId::new(1)).unwrap_err(),
            QuestionError::EmptyPrompt
        );
    }

    #[test]
    fn aid_station_rejects_duplicates() {
        let err = AidStation::new(["Banana", "Water", "Banana"]).unwrap_err();
        assert!(matches!(err, QuestionError::DuplicateAidItem { .. }));
        let none: [&str; 0] = [];
        assert_eq!(
            AidStation::new(none).unwrap_err(),
            QuestionError::EmptyAidStation
        );
    }

    #[test]
    fn blank_landmark_is_rejected() {
        let mut d = draft();
        d.landmark = Some(" ".into());
        assert_eq!(
            d.validate(QuestionId::new(1)).unwrap_err(),
            QuestionError::BlankLandmark
        );
    }

    #[test]
    fn distance_parses_and_displays_km() {
        assert_eq!(Distance::from_km(42.195).unwrap().meters(), 42_195);
        assert_eq!(Distance::from_km(42.195).unwrap().to_string(), "42.195 km");
        assert_eq!(Distance::from_km(21.1).unwrap().to_string(), "21.1 km");
        assert_eq!(Distance::from_km(5.0).unwrap().to_string(), "5 km");
        assert!(Distance::from_km(-1.0).is_err());
        assert!(Distance::from_km(f64::NAN).is_err());
    }

    #[test]
    fn answer_index_bounds() {
        assert_eq!(AnswerIndex::new(3).unwrap().label(), 4);
        assert_eq!(
            AnswerIndex::new(4).unwrap_err(),
            QuestionError::AnswerOutOfRange { index: 4 }
        );
        assert_eq!(AnswerIndex::all().count(), OPTION_COUNT);
    }
}
