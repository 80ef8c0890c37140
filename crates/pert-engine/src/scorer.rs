use pert_core::types::{RiskFactorScore, ThreePointEstimate};

/// PERT (beta approximation) scoring for a single risk factor.
///
/// ```text
/// score  = (O + 4M + P) / 6
/// stddev = (P - O) / 6
/// ```
///
/// Range and ordering are guaranteed by [`ThreePointEstimate`], so scoring
/// cannot fail. Both outputs stay within [0, 100].
#[derive(Debug, Clone, Copy, Default)]
pub struct PertFactorScorer;

impl PertFactorScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, estimate: &ThreePointEstimate) -> RiskFactorScore {
        RiskFactorScore {
            score: expected_value(estimate),
            stddev: standard_deviation(estimate),
        }
    }
}

/// Weighted mean with the most likely point counted four times.
pub fn expected_value(estimate: &ThreePointEstimate) -> f64 {
    (estimate.optimistic() + 4.0 * estimate.most_likely() + estimate.pessimistic()) / 6.0
}

/// One sixth of the optimistic-to-pessimistic range.
pub fn standard_deviation(estimate: &ThreePointEstimate) -> f64 {
    estimate.range() / 6.0
}
