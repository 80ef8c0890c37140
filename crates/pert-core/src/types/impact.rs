//! Externally assigned plan impact level.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::profile::WeightProfile;
use crate::errors::ConfigError;

/// Severity classification 1-5:
/// throwaway, low-risk, medium, high-impact, mission-critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ImpactLevel(u8);

impl ImpactLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(level: u8) -> Result<Self, ConfigError> {
        if !(Self::MIN..=Self::MAX).contains(&level) {
            return Err(ConfigError::InvalidValue {
                field: "impact_level".to_string(),
                message: format!("{level} is not between {} and {}", Self::MIN, Self::MAX),
            });
        }
        Ok(Self(level))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Levels 1-2 use the quick profile, 3-5 the full profile.
    pub fn profile(self) -> WeightProfile {
        if self.0 <= 2 {
            WeightProfile::Quick
        } else {
            WeightProfile::Full
        }
    }

    /// Level 1 is experimental work held to a relaxed threshold.
    pub fn is_throwaway(self) -> bool {
        self.0 == 1
    }

    pub fn label(self) -> &'static str {
        match self.0 {
            1 => "throwaway",
            2 => "low-risk",
            3 => "medium-impact",
            4 => "high-impact",
            _ => "mission-critical",
        }
    }
}

impl Default for ImpactLevel {
    fn default() -> Self {
        Self(3)
    }
}

impl TryFrom<u8> for ImpactLevel {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ImpactLevel> for u8 {
    fn from(level: ImpactLevel) -> Self {
        level.0
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}
