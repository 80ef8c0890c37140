//! Calibration configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ADJUSTMENT_ERROR_DIVISOR, ADJUSTMENT_STEP_SCALE, CALIBRATION_TOLERANCE, DEFAULT_BUCKET_WIDTH,
    MIN_SAMPLE_SIZE,
};

/// Configuration for the calibration analyzer.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Confidence bucket width in percentage points. Default: 2.
    pub bucket_width: Option<u32>,
    /// Records required before recommending a change. Default: 5.
    pub min_sample_size: Option<usize>,
    /// Error band treated as well-calibrated. Default: 2.0.
    pub tolerance: Option<f64>,
    /// Error divisor for step sizing. Default: 2.5.
    pub error_divisor: Option<f64>,
    /// Step scale for step sizing. Default: 0.05.
    pub step_scale: Option<f64>,
}

impl CalibrationConfig {
    pub fn effective_bucket_width(&self) -> u32 {
        self.bucket_width.unwrap_or(DEFAULT_BUCKET_WIDTH)
    }

    pub fn effective_min_sample_size(&self) -> usize {
        self.min_sample_size.unwrap_or(MIN_SAMPLE_SIZE)
    }

    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(CALIBRATION_TOLERANCE)
    }

    pub fn effective_error_divisor(&self) -> f64 {
        self.error_divisor.unwrap_or(ADJUSTMENT_ERROR_DIVISOR)
    }

    pub fn effective_step_scale(&self) -> f64 {
        self.step_scale.unwrap_or(ADJUSTMENT_STEP_SCALE)
    }
}
