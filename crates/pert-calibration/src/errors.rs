//! Calibration errors.

use pert_core::errors::error_code::{self, PertErrorCode};
use pert_core::errors::{ConfigError, StorageError};

/// Errors from running or applying a calibration.
#[derive(Debug, thiserror::Error)]
pub enum CalibrationError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("nothing to apply: {reason}")]
    NothingToApply { reason: String },

    #[error(
        "recommendation was made for multiplier {recommended_for:.2} but the configuration holds {configured:.2}"
    )]
    StaleRecommendation {
        recommended_for: f64,
        configured: f64,
    },
}

impl PertErrorCode for CalibrationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::NothingToApply { .. } => error_code::NOTHING_TO_APPLY,
            Self::StaleRecommendation { .. } => error_code::STALE_RECOMMENDATION,
        }
    }
}
