//! Results of scoring a single plan phase.

use serde::{Deserialize, Serialize};

use super::estimate::ThreePointEstimate;
use super::factor::FactorKey;
use super::profile::WeightProfile;
use crate::constants::HIGH_VARIANCE_SD;

/// PERT expected value and standard deviation for one factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactorScore {
    /// `(O + 4M + P) / 6`.
    pub score: f64,
    /// `(P - O) / 6`.
    pub stddev: f64,
}

/// One factor's contribution to a phase assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorBreakdown {
    pub factor: FactorKey,
    pub estimate: ThreePointEstimate,
    pub score: f64,
    pub stddev: f64,
    pub weight: f64,
    /// `score * weight`.
    pub weighted_risk: f64,
}

impl FactorBreakdown {
    /// Spread wide enough that mitigation research should start here.
    pub fn is_high_variance(&self) -> bool {
        self.stddev > HIGH_VARIANCE_SD
    }
}

/// Output of one confidence engine evaluation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub profile: WeightProfile,
    /// Multiplier in effect for this evaluation.
    pub multiplier: f64,
    /// Confident-success threshold in effect for this evaluation.
    pub threshold: f64,
    /// Weighted risk on a 0-100 scale.
    pub total_risk: f64,
    /// `100 - total_risk`.
    pub phase_success: f64,
    /// Per-factor standard deviations summed directly.
    pub total_sd: f64,
    /// `multiplier * total_sd`.
    pub confidence_width: f64,
    /// `phase_success - confidence_width`.
    pub confident_success: f64,
    pub meets_threshold: bool,
    pub requires_mitigation: bool,
    /// Factors in profile order.
    pub factors: Vec<FactorBreakdown>,
}

impl AssessmentResult {
    /// Factors ordered by standard deviation, widest first.
    pub fn mitigation_priorities(&self) -> Vec<&FactorBreakdown> {
        let mut sorted: Vec<&FactorBreakdown> = self.factors.iter().collect();
        sorted.sort_by(|a, b| b.stddev.total_cmp(&a.stddev));
        sorted
    }

    /// Factors whose spread exceeds the high-variance cutoff.
    pub fn high_variance_factors(&self) -> impl Iterator<Item = &FactorBreakdown> {
        self.factors.iter().filter(|f| f.is_high_variance())
    }

    pub fn factor(&self, key: FactorKey) -> Option<&FactorBreakdown> {
        self.factors.iter().find(|f| f.factor == key)
    }

    /// Copy rounded to display precision: factor score/SD/weighted risk to two
    /// decimals, aggregates to one. Verdict flags are kept from the unrounded
    /// computation.
    pub fn rounded(&self) -> Self {
        Self {
            profile: self.profile,
            multiplier: self.multiplier,
            threshold: self.threshold,
            total_risk: round_to(self.total_risk, 1),
            phase_success: round_to(self.phase_success, 1),
            total_sd: round_to(self.total_sd, 1),
            confidence_width: round_to(self.confidence_width, 1),
            confident_success: round_to(self.confident_success, 1),
            meets_threshold: self.meets_threshold,
            requires_mitigation: self.requires_mitigation,
            factors: self
                .factors
                .iter()
                .map(|f| FactorBreakdown {
                    factor: f.factor,
                    estimate: f.estimate,
                    score: round_to(f.score, 2),
                    stddev: round_to(f.stddev, 2),
                    weight: f.weight,
                    weighted_risk: round_to(f.weighted_risk, 2),
                })
                .collect(),
        }
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
