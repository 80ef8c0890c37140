//! Confidence engine evaluation errors.

use super::error_code::{self, PertErrorCode};
use super::EstimateError;
use crate::types::{FactorKey, WeightProfile};

/// Errors returned by a single phase evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssessmentError {
    #[error("missing required risk factors for {profile} mode: {}", join_keys(.missing))]
    MissingFactors {
        profile: WeightProfile,
        missing: Vec<FactorKey>,
    },

    #[error("invalid estimate for {factor}: {source}")]
    InvalidEstimate {
        factor: FactorKey,
        #[source]
        source: EstimateError,
    },
}

impl PertErrorCode for AssessmentError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFactors { .. } => error_code::MISSING_FACTORS,
            Self::InvalidEstimate { .. } => error_code::INVALID_ESTIMATE,
        }
    }
}

fn join_keys(keys: &[FactorKey]) -> String {
    keys.iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
