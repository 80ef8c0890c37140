//! The single calibrated parameter of the confidence formula.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MULTIPLIER, MAX_MULTIPLIER, MIN_MULTIPLIER};
use crate::errors::ConfigError;

/// Scales the summed standard deviation into a confidence-interval width.
///
/// Always within [1.5, 3.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct CalibrationMultiplier(f64);

impl CalibrationMultiplier {
    pub const MIN: f64 = MIN_MULTIPLIER;
    pub const MAX: f64 = MAX_MULTIPLIER;
    pub const DEFAULT: f64 = DEFAULT_MULTIPLIER;

    /// Build a multiplier, rejecting values outside [1.5, 3.0].
    pub fn new(value: f64) -> Result<Self, ConfigError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ConfigError::InvalidValue {
                field: "confidence_multiplier".to_string(),
                message: format!("{value} is outside [{:.1}, {:.1}]", Self::MIN, Self::MAX),
            });
        }
        Ok(Self(value))
    }

    /// Build a multiplier, saturating at the bounds. NaN maps to the default.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(Self::DEFAULT);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for CalibrationMultiplier {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f64> for CalibrationMultiplier {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CalibrationMultiplier> for f64 {
    fn from(m: CalibrationMultiplier) -> Self {
        m.0
    }
}

impl fmt::Display for CalibrationMultiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(CalibrationMultiplier::new(1.5).is_ok());
        assert!(CalibrationMultiplier::new(3.0).is_ok());
        assert!(CalibrationMultiplier::new(1.49).is_err());
        assert!(CalibrationMultiplier::new(3.01).is_err());
        assert!(CalibrationMultiplier::new(f64::INFINITY).is_err());
    }

    #[test]
    fn clamped_saturates() {
        assert_eq!(CalibrationMultiplier::clamped(10.0).value(), 3.0);
        assert_eq!(CalibrationMultiplier::clamped(-1.0).value(), 1.5);
        assert_eq!(CalibrationMultiplier::clamped(f64::NAN).value(), 2.0);
    }
}
