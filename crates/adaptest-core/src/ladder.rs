//! The fixed difficulty ladder.
//!
//! Four tiers in a stated total order. Stepping past either end clamps, so
//! `next` and `previous` are total functions over the enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One rung of the difficulty ladder.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    VeryEasy,
    Easy,
    Moderate,
    Difficult,
}

impl DifficultyTier {
    /// All tiers in ladder order, easiest first.
    pub const ALL: [DifficultyTier; 4] = [
        DifficultyTier::VeryEasy,
        DifficultyTier::Easy,
        DifficultyTier::Moderate,
        DifficultyTier::Difficult,
    ];

    /// The tier one step harder, clamped at `Difficult`.
    pub fn next(self) -> DifficultyTier {
        match self {
            DifficultyTier::VeryEasy => DifficultyTier::Easy,
            DifficultyTier::Easy => DifficultyTier::Moderate,
            DifficultyTier::Moderate => DifficultyTier::Difficult,
            DifficultyTier::Difficult => DifficultyTier::Difficult,
        }
    }

    /// The tier one step easier, clamped at `VeryEasy`.
    pub fn previous(self) -> DifficultyTier {
        match self {
            DifficultyTier::VeryEasy => DifficultyTier::VeryEasy,
            DifficultyTier::Easy => DifficultyTier::VeryEasy,
            DifficultyTier::Moderate => DifficultyTier::Easy,
            DifficultyTier::Difficult => DifficultyTier::Moderate,
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DifficultyTier::VeryEasy => write!(f, "very_easy"),
            DifficultyTier::Easy => write!(f, "easy"),
            DifficultyTier::Moderate => write!(f, "moderate"),
            DifficultyTier::Difficult => write!(f, "difficult"),
        }
    }
}

impl FromStr for DifficultyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "very_easy" | "very-easy" => Ok(DifficultyTier::VeryEasy),
            "easy" => Ok(DifficultyTier::Easy),
            "moderate" | "medium" => Ok(DifficultyTier::Moderate),
            "difficult" | "hard" => Ok(DifficultyTier::Difficult),
            other => Err(format!("unknown difficulty tier: {other}")),
        }
    }
}
