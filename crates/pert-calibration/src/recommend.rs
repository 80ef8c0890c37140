//! Bounded multiplier recommendations.
//!
//! ```text
//! step        = |mean_error| / error_divisor × step_scale
//! recommended = clamp(current ± step, 1.5, 3.0)
//! ```
//!
//! Overconfidence (predictions above reality) widens the interval by raising
//! the multiplier; underconfidence narrows it.

use serde::Serialize;

use pert_core::constants::MAX_MULTIPLIER;
use pert_core::tracing::events;
use pert_core::types::CalibrationMultiplier;

use crate::analyzer::CalibrationSettings;
use crate::stats::CalibrationStats;

/// Which way the interval should move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentDirection {
    /// Raise the multiplier.
    Widen,
    /// Lower the multiplier.
    Narrow,
}

impl AdjustmentDirection {
    fn verb(self) -> &'static str {
        match self {
            Self::Widen => "widening",
            Self::Narrow => "narrowing",
        }
    }

    fn bias(self) -> &'static str {
        match self {
            Self::Widen => "overconfident",
            Self::Narrow => "underconfident",
        }
    }
}

/// Why the recommendation came out the way it did.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Too few records to judge; multiplier unchanged.
    InsufficientSample { have: usize, need: usize },
    /// Enough records, but none carries a usable prediction; multiplier
    /// unchanged.
    NoPredictions { records: usize },
    /// Mean error inside tolerance; multiplier unchanged.
    WellCalibrated,
    /// Bias detected. `clamped` is set when a bound cut the step short.
    Adjust {
        direction: AdjustmentDirection,
        step: f64,
        clamped: bool,
    },
}

/// Advisory multiplier recommendation. Applying it is a separate action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub current: CalibrationMultiplier,
    pub recommended: CalibrationMultiplier,
    /// Mean calibration error the recommendation is based on.
    pub mean_error: f64,
    pub kind: RecommendationKind,
    pub justification: String,
}

impl Recommendation {
    /// True when following the recommendation would change the multiplier.
    pub fn is_change(&self) -> bool {
        self.recommended != self.current
    }

    /// Signed change, `recommended - current`.
    pub fn delta(&self) -> f64 {
        self.recommended.value() - self.current.value()
    }
}

pub(crate) fn recommend(
    stats: &CalibrationStats,
    current: CalibrationMultiplier,
    settings: &CalibrationSettings,
) -> Recommendation {
    let mean_error = stats.mean_error;

    let (recommended, kind, justification) = if stats.total_records < settings.min_sample_size {
        (
            current,
            RecommendationKind::InsufficientSample {
                have: stats.total_records,
                need: settings.min_sample_size,
            },
            format!(
                "Insufficient data ({} plans, need ≥{})",
                stats.total_records, settings.min_sample_size
            ),
        )
    } else if stats.predicted_records == 0 {
        tracing::warn!(
            event = events::RECOMMENDATION_MADE,
            total_records = stats.total_records,
            "no usable predictions in the outcome log"
        );
        (
            current,
            RecommendationKind::NoPredictions {
                records: stats.total_records,
            },
            format!(
                "No recorded predictions ({} plans); holding multiplier at {current}",
                stats.total_records
            ),
        )
    } else if mean_error.abs() < settings.tolerance {
        (
            current,
            RecommendationKind::WellCalibrated,
            format!("System well-calibrated (error: {mean_error:+.1}%)"),
        )
    } else {
        let direction = if mean_error > 0.0 {
            AdjustmentDirection::Widen
        } else {
            AdjustmentDirection::Narrow
        };
        let step = mean_error.abs() / settings.error_divisor * settings.step_scale;
        let target = match direction {
            AdjustmentDirection::Widen => current.value() + step,
            AdjustmentDirection::Narrow => current.value() - step,
        };
        let recommended = CalibrationMultiplier::clamped(target);
        let clamped = recommended.value() != target;

        let justification = if recommended == current {
            let bound = if current.value() >= MAX_MULTIPLIER {
                "upper"
            } else {
                "lower"
            };
            format!(
                "System is {} by {:.1}%. Multiplier already at its {bound} bound ({current}); holding",
                direction.bias(),
                mean_error.abs(),
            )
        } else {
            format!(
                "System is {} by {:.1}%. Recommendation: {} confidence interval ({current} → {recommended})",
                direction.bias(),
                mean_error.abs(),
                direction.verb(),
            )
        };

        (
            recommended,
            RecommendationKind::Adjust {
                direction,
                step,
                clamped,
            },
            justification,
        )
    };

    tracing::info!(
        event = events::RECOMMENDATION_MADE,
        current = current.value(),
        recommended = recommended.value(),
        mean_error,
        total_records = stats.total_records,
        justification = %justification,
    );

    Recommendation {
        current,
        recommended,
        mean_error,
        kind,
        justification,
    }
}
