//! Three-point estimate validation errors.

use super::error_code::{self, PertErrorCode};

/// Ways a three-point estimate can be rejected at construction.
///
/// All variants are caller input errors: never retried, surfaced immediately.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    #[error("{point} estimate {value} is outside 0-100")]
    OutOfRange { point: &'static str, value: f64 },

    #[error("{point} estimate is not a finite number")]
    NotFinite { point: &'static str },

    #[error("pessimistic ({pessimistic}) cannot be less than optimistic ({optimistic})")]
    PessimisticBelowOptimistic { optimistic: f64, pessimistic: f64 },

    #[error(
        "most likely ({most_likely}) must be between optimistic ({optimistic}) and pessimistic ({pessimistic})"
    )]
    MostLikelyOutOfBounds {
        optimistic: f64,
        most_likely: f64,
        pessimistic: f64,
    },
}

impl PertErrorCode for EstimateError {
    fn error_code(&self) -> &'static str {
        error_code::INVALID_ESTIMATE
    }
}
