//! Fixed risk factor weight profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::factor::FactorKey;

/// 5-factor weights for full analysis (impact 3-5).
const FULL_WEIGHTS: [(FactorKey, f64); 5] = [
    (FactorKey::Complexity, 0.25),
    (FactorKey::Dependencies, 0.20),
    (FactorKey::StackCompat, 0.25),
    (FactorKey::Knowledge, 0.15),
    (FactorKey::Testing, 0.15),
];

/// 3-factor weights for quick analysis (impact 1-2).
const QUICK_WEIGHTS: [(FactorKey, f64); 3] = [
    (FactorKey::Complexity, 0.40),
    (FactorKey::Dependencies, 0.35),
    (FactorKey::Testing, 0.25),
];

/// Named weight profile. Weights in each profile sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightProfile {
    /// complexity, dependencies, testing.
    Quick,
    /// All five factors.
    Full,
}

impl WeightProfile {
    /// Factor weights in evaluation order.
    pub fn weights(&self) -> &'static [(FactorKey, f64)] {
        match self {
            Self::Quick => &QUICK_WEIGHTS,
            Self::Full => &FULL_WEIGHTS,
        }
    }

    /// Weight for a factor, or `None` if the profile does not use it.
    pub fn weight(&self, key: FactorKey) -> Option<f64> {
        self.weights()
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, w)| *w)
    }

    /// Factors that must be present to evaluate under this profile.
    pub fn required_factors(&self) -> impl Iterator<Item = FactorKey> {
        self.weights().iter().map(|(k, _)| *k)
    }

    pub fn factor_count(&self) -> usize {
        self.weights().len()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Quick => "quick",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for WeightProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}-factor)", self.name(), self.factor_count())
    }
}
