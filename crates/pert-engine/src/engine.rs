use pert_core::config::EngineConfig;
use pert_core::constants::MAX_RISK;
use pert_core::errors::AssessmentError;
use pert_core::tracing::events;
use pert_core::types::{
    AssessmentResult, CalibrationMultiplier, FactorBreakdown, FactorInputs, FactorKey,
    ImpactLevel, WeightProfile,
};

use crate::scorer::PertFactorScorer;

/// Weighted multi-factor confidence engine.
///
/// ```text
/// total_risk        = Σ score_i × weight_i
/// total_sd          = Σ stddev_i
/// phase_success     = 100 − total_risk
/// confidence_width  = multiplier × total_sd
/// confident_success = phase_success − confidence_width
/// ```
///
/// Standard deviations are summed directly rather than in quadrature, which
/// widens the interval. A phase passes when `confident_success >= threshold`.
#[derive(Debug, Clone, Default)]
pub struct ConfidenceEngine {
    scorer: PertFactorScorer,
}

impl ConfidenceEngine {
    pub fn new() -> Self {
        Self {
            scorer: PertFactorScorer::new(),
        }
    }

    /// Evaluate one phase's factors under `profile`.
    ///
    /// Every absent required factor is reported at once. Keys the profile
    /// does not use are ignored, including ones holding invalid estimates.
    pub fn evaluate(
        &self,
        factors: &FactorInputs,
        profile: WeightProfile,
        config: &EngineConfig,
    ) -> Result<AssessmentResult, AssessmentError> {
        let missing: Vec<FactorKey> = profile
            .required_factors()
            .filter(|key| !factors.contains(*key))
            .collect();
        if !missing.is_empty() {
            tracing::debug!(
                event = events::ASSESSMENT_REJECTED,
                profile = profile.name(),
                missing = missing.len(),
            );
            return Err(AssessmentError::MissingFactors { profile, missing });
        }

        let mut breakdown = Vec::with_capacity(profile.factor_count());
        for &(factor, weight) in profile.weights() {
            let Some(raw) = factors.get(factor) else {
                continue;
            };
            let estimate = raw
                .validate()
                .map_err(|source| AssessmentError::InvalidEstimate { factor, source })?;
            let scored = self.scorer.score(&estimate);
            breakdown.push(FactorBreakdown {
                factor,
                estimate,
                score: scored.score,
                stddev: scored.stddev,
                weight,
                weighted_risk: scored.score * weight,
            });
        }

        let total_risk: f64 = breakdown.iter().map(|f| f.weighted_risk).sum();
        let total_sd: f64 = breakdown.iter().map(|f| f.stddev).sum();
        let multiplier = config.multiplier().value();
        let threshold = config.threshold();

        let phase_success = MAX_RISK - total_risk;
        let confidence_width = multiplier * total_sd;
        let confident_success = phase_success - confidence_width;
        let meets_threshold = confident_success >= threshold;

        tracing::debug!(
            event = events::ASSESSMENT_EVALUATED,
            profile = profile.name(),
            total_risk,
            total_sd,
            multiplier,
            confident_success,
            threshold,
            meets_threshold,
        );

        Ok(AssessmentResult {
            profile,
            multiplier,
            threshold,
            total_risk,
            phase_success,
            total_sd,
            confidence_width,
            confident_success,
            meets_threshold,
            requires_mitigation: !meets_threshold,
            factors: breakdown,
        })
    }

    /// Evaluate with the profile and compiled-default threshold implied by
    /// the impact level.
    pub fn evaluate_for_impact(
        &self,
        factors: &FactorInputs,
        impact: ImpactLevel,
        multiplier: CalibrationMultiplier,
    ) -> Result<AssessmentResult, AssessmentError> {
        let config = EngineConfig::for_impact(impact, multiplier);
        self.evaluate(factors, impact.profile(), &config)
    }
}
