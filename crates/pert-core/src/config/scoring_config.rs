//! Scoring configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MULTIPLIER, DEFAULT_THRESHOLD, LOW_IMPACT_THRESHOLD};

/// Configuration for the confidence engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoringConfig {
    /// Confidence-interval multiplier. Default: 2.0. Range: [1.5, 3.0].
    pub confidence_multiplier: Option<f64>,
    /// Confident-success threshold for impact 2-5. Default: 85.0.
    pub threshold: Option<f64>,
    /// Confident-success threshold for impact 1. Default: 75.0.
    pub low_impact_threshold: Option<f64>,
}

impl ScoringConfig {
    pub fn effective_multiplier(&self) -> f64 {
        self.confidence_multiplier.unwrap_or(DEFAULT_MULTIPLIER)
    }

    pub fn effective_threshold(&self) -> f64 {
        self.threshold.unwrap_or(DEFAULT_THRESHOLD)
    }

    pub fn effective_low_impact_threshold(&self) -> f64 {
        self.low_impact_threshold.unwrap_or(LOW_IMPACT_THRESHOLD)
    }
}
