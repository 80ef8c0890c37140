//! Immutable per-evaluation engine configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_THRESHOLD, LOW_IMPACT_THRESHOLD};
use crate::errors::ConfigError;
use crate::types::{CalibrationMultiplier, ImpactLevel};

/// Everything an evaluation depends on besides its inputs.
///
/// Passed explicitly into every evaluation so a result is always reproducible
/// from the configuration declared at the time of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    multiplier: CalibrationMultiplier,
    threshold: f64,
}

impl EngineConfig {
    pub fn new(multiplier: CalibrationMultiplier, threshold: f64) -> Result<Self, ConfigError> {
        if !threshold.is_finite() || !(0.0..=100.0).contains(&threshold) {
            return Err(ConfigError::InvalidValue {
                field: "threshold".to_string(),
                message: format!("{threshold} is not between 0 and 100"),
            });
        }
        Ok(Self {
            multiplier,
            threshold,
        })
    }

    /// Compiled-default thresholds for an impact level.
    pub fn for_impact(level: ImpactLevel, multiplier: CalibrationMultiplier) -> Self {
        let threshold = if level.is_throwaway() {
            LOW_IMPACT_THRESHOLD
        } else {
            DEFAULT_THRESHOLD
        };
        Self {
            multiplier,
            threshold,
        }
    }

    pub fn multiplier(&self) -> CalibrationMultiplier {
        self.multiplier
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Same configuration with a different multiplier.
    pub fn with_multiplier(self, multiplier: CalibrationMultiplier) -> Self {
        Self { multiplier, ..self }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            multiplier: CalibrationMultiplier::default(),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}
