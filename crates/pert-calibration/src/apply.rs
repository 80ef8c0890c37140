//! The explicit operator action that turns a recommendation into configuration.

use pert_core::config::{EngineConfig, PertConfig};
use pert_core::errors::ConfigError;
use pert_core::tracing::events;
use pert_core::types::ImpactLevel;
use pert_storage::{AdjustmentEntry, MultiplierHistory};

use crate::errors::CalibrationError;
use crate::recommend::Recommendation;

/// Outcome of applying a recommendation.
#[derive(Debug, Clone)]
pub struct AppliedAdjustment {
    /// Line appended to the multiplier history.
    pub entry: AdjustmentEntry,
    /// Configuration carrying the new multiplier. Not written anywhere;
    /// persist it with [`PertConfig::save`] if wanted.
    pub config: PertConfig,
}

impl AppliedAdjustment {
    /// Engine configuration for subsequent evaluations at `impact`.
    pub fn engine_config(&self, impact: ImpactLevel) -> Result<EngineConfig, ConfigError> {
        self.config.engine_config(impact)
    }
}

/// Apply an accepted recommendation: record it in `history` and return the
/// updated configuration.
///
/// Fails without writing anything when the recommendation would not change
/// the multiplier, or when it was computed against a multiplier other than
/// the one `config` holds.
pub fn apply_recommendation(
    recommendation: &Recommendation,
    config: &PertConfig,
    history: &MultiplierHistory,
) -> Result<AppliedAdjustment, CalibrationError> {
    if !recommendation.is_change() {
        return Err(CalibrationError::NothingToApply {
            reason: recommendation.justification.clone(),
        });
    }

    let configured = config.scoring.effective_multiplier();
    if configured != recommendation.current.value() {
        return Err(CalibrationError::StaleRecommendation {
            recommended_for: recommendation.current.value(),
            configured,
        });
    }

    let next = config.with_multiplier(recommendation.recommended);
    PertConfig::validate(&next)?;

    let entry = AdjustmentEntry::new(
        recommendation.current,
        recommendation.recommended,
        recommendation.mean_error,
    );
    history.append(&entry)?;

    tracing::info!(
        event = events::RECOMMENDATION_APPLIED,
        previous = recommendation.current.value(),
        applied = recommendation.recommended.value(),
        history = %history.path().display(),
    );

    Ok(AppliedAdjustment {
        entry,
        config: next,
    })
}
