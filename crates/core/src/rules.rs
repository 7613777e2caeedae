use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

//
// ─── SCORING ───────────────────────────────────────────────────────────────────
//

/// Points for a correct answer.
pub const CORRECT_POINTS: u32 = 10;
/// Points lost for a wrong answer; score never drops below zero.
pub const WRONG_PENALTY: u32 = 3;
/// Stamina regained for a correct answer, capped at `MAX_STAMINA`.
pub const STAMINA_RECOVERY: u8 = 10;
/// Stamina lost for a wrong answer, floored at zero.
pub const STAMINA_COST: u8 = 12;
pub const MAX_STAMINA: u8 = 100;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RulesError {
    #[error("silver threshold must be below 100%, got {0}%")]
    InvalidSilverThreshold(u8),

    #[error("bronze threshold ({bronze}%) must not exceed silver threshold ({silver}%)")]
    InvalidThresholdOrder { silver: u8, bronze: u8 },
}

//
// ─── ACCURACY ──────────────────────────────────────────────────────────────────
//

/// Correct answers out of answers given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Accuracy {
    pub correct: u32,
    pub total: u32,
}

impl Accuracy {
    #[must_use]
    pub fn new(correct: u32, total: u32) -> Self {
        Self {
            correct: correct.min(total),
            total,
        }
    }

    /// Whole percent, rounded down. Zero when nothing was answered.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn percent(self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (u64::from(self.correct) * 100 / u64::from(self.total)) as u8
    }

    #[must_use]
    pub fn is_perfect(self) -> bool {
        self.total > 0 && self.correct == self.total
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({}%)", self.correct, self.total, self.percent())
    }
}

//
// ─── MEDALS ────────────────────────────────────────────────────────────────────
//

/// Reward tier for a finished race. Ordered from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Medal {
    Finisher,
    Bronze,
    Silver,
    Gold,
}

impl Medal {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
            Medal::Finisher => "Finisher",
        }
    }
}

impl fmt::Display for Medal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Accuracy cut-offs for the medal tiers below gold.
///
/// Gold is reserved for a perfect run and is not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedalPolicy {
    silver_min_percent: u8,
    bronze_min_percent: u8,
}

impl Default for MedalPolicy {
    fn default() -> Self {
        Self {
            silver_min_percent: 70,
            bronze_min_percent: 40,
        }
    }
}

impl MedalPolicy {
    /// # Errors
    ///
    /// Returns `RulesError` unless `bronze <= silver < 100`.
    pub fn new(silver_min_percent: u8, bronze_min_percent: u8) -> Result<Self, RulesError> {
        if silver_min_percent >= 100 {
            return Err(RulesError::InvalidSilverThreshold(silver_min_percent));
        }
        if bronze_min_percent > silver_min_percent {
            return Err(RulesError::InvalidThresholdOrder {
                silver: silver_min_percent,
                bronze: bronze_min_percent,
            });
        }
        Ok(Self {
            silver_min_percent,
            bronze_min_percent,
        })
    }

    #[must_use]
    pub fn silver_min_percent(&self) -> u8 {
        self.silver_min_percent
    }

    #[must_use]
    pub fn bronze_min_percent(&self) -> u8 {
        self.bronze_min_percent
    }

    #[must_use]
    pub fn medal_for(&self, accuracy: Accuracy) -> Medal {
        if accuracy.is_perfect() {
            return Medal::Gold;
        }
        let percent = accuracy.percent();
        if percent >= self.silver_min_percent {
            Medal::Silver
        } else if percent >= self.bronze_min_percent {
            Medal::Bronze
        } else {
            Medal::Finisher
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
