//! Three-point (optimistic / most likely / pessimistic) risk estimates.

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_RISK, MIN_RISK};
use crate::errors::EstimateError;

/// Unvalidated O/M/P triple as it arrives from a plan document or JSON input.
///
/// Wire format is `{"O": 5, "M": 15, "P": 30}`; long field names are accepted
/// as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawEstimate {
    #[serde(rename = "O", alias = "optimistic")]
    pub optimistic: f64,
    #[serde(rename = "M", alias = "most_likely")]
    pub most_likely: f64,
    #[serde(rename = "P", alias = "pessimistic")]
    pub pessimistic: f64,
}

impl RawEstimate {
    pub fn new(optimistic: f64, most_likely: f64, pessimistic: f64) -> Self {
        Self {
            optimistic,
            most_likely,
            pessimistic,
        }
    }

    /// Validate into a [`ThreePointEstimate`].
    pub fn validate(self) -> Result<ThreePointEstimate, EstimateError> {
        ThreePointEstimate::new(self.optimistic, self.most_likely, self.pessimistic)
    }
}

/// A validated three-point risk estimate.
///
/// Each point is a risk value in [0, 100] (0 = no risk, 100 = maximum risk)
/// with `optimistic <= most_likely <= pessimistic`. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEstimate", into = "RawEstimate")]
pub struct ThreePointEstimate {
    optimistic: f64,
    most_likely: f64,
    pessimistic: f64,
}

impl ThreePointEstimate {
    /// Build an estimate, rejecting out-of-range or misordered points.
    pub fn new(optimistic: f64, most_likely: f64, pessimistic: f64) -> Result<Self, EstimateError> {
        for (point, value) in [
            ("optimistic", optimistic),
            ("most likely", most_likely),
            ("pessimistic", pessimistic),
        ] {
            if !value.is_finite() {
                return Err(EstimateError::NotFinite { point });
            }
            if !(MIN_RISK..=MAX_RISK).contains(&value) {
                return Err(EstimateError::OutOfRange { point, value });
            }
        }

        if pessimistic < optimistic {
            return Err(EstimateError::PessimisticBelowOptimistic {
                optimistic,
                pessimistic,
            });
        }

        if !(optimistic..=pessimistic).contains(&most_likely) {
            return Err(EstimateError::MostLikelyOutOfBounds {
                optimistic,
                most_likely,
                pessimistic,
            });
        }

        Ok(Self {
            optimistic,
            most_likely,
            pessimistic,
        })
    }

    /// An estimate with no spread: O = M = P = `value`.
    pub fn certain(value: f64) -> Result<Self, EstimateError> {
        Self::new(value, value, value)
    }

    pub fn optimistic(&self) -> f64 {
        self.optimistic
    }

    pub fn most_likely(&self) -> f64 {
        self.most_likely
    }

    pub fn pessimistic(&self) -> f64 {
        self.pessimistic
    }

    /// Width of the estimate, `P - O`.
    pub fn range(&self) -> f64 {
        self.pessimistic - self.optimistic
    }
}

impl TryFrom<RawEstimate> for ThreePointEstimate {
    type Error = EstimateError;

    fn try_from(raw: RawEstimate) -> Result<Self, Self::Error> {
        raw.validate()
    }
}

impl From<ThreePointEstimate> for RawEstimate {
    fn from(estimate: ThreePointEstimate) -> Self {
        Self {
            optimistic: estimate.optimistic,
            most_likely: estimate.most_likely,
            pessimistic: estimate.pessimistic,
        }
    }
}
