//! Multi-phase plan assessment.
//!
//! A plan is an ordered list of named phases sharing one impact level. Each
//! phase is evaluated independently; a phase that fails to evaluate is
//! reported alongside the others instead of aborting the plan.

use serde::{Deserialize, Serialize};

use pert_core::config::EngineConfig;
use pert_core::errors::AssessmentError;
use pert_core::tracing::events;
use pert_core::types::{
    ActualOutcome, AssessmentResult, FactorInputs, ImpactLevel, OutcomeRecord, PhaseConfidence,
    WeightProfile,
};

use crate::engine::ConfidenceEngine;

/// One phase as supplied by the plan extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseInput {
    pub name: String,
    pub risk_factors: FactorInputs,
}

/// A whole plan as supplied by the plan extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanInput {
    pub plan_name: String,
    #[serde(default)]
    pub impact_level: ImpactLevel,
    pub phases: Vec<PhaseInput>,
}

/// Result of evaluating one phase.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseAssessment {
    pub name: String,
    pub result: Result<AssessmentResult, AssessmentError>,
}

impl PhaseAssessment {
    pub fn passed(&self) -> bool {
        matches!(self.result, Ok(ref r) if r.meets_threshold)
    }

    pub fn confident_success(&self) -> Option<f64> {
        self.result.as_ref().ok().map(|r| r.confident_success)
    }
}

/// Per-phase results for a plan plus plan-level aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanAssessment {
    pub plan_name: String,
    pub impact_level: ImpactLevel,
    pub profile: WeightProfile,
    pub phases: Vec<PhaseAssessment>,
}

impl PlanAssessment {
    /// True when every phase evaluated and met its threshold.
    /// A plan with no phases never passes.
    pub fn all_passed(&self) -> bool {
        !self.phases.is_empty() && self.phases.iter().all(PhaseAssessment::passed)
    }

    pub fn passed_count(&self) -> usize {
        self.phases.iter().filter(|p| p.passed()).count()
    }

    /// Phases that produced a result.
    pub fn evaluated_count(&self) -> usize {
        self.phases.iter().filter(|p| p.result.is_ok()).count()
    }

    /// Phases whose evaluation failed, with their errors.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &AssessmentError)> {
        self.phases
            .iter()
            .filter_map(|p| p.result.as_ref().err().map(|e| (p.name.as_str(), e)))
    }

    /// Mean confident success over evaluated phases.
    pub fn average_confidence(&self) -> Option<f64> {
        let values: Vec<f64> = self
            .phases
            .iter()
            .filter_map(PhaseAssessment::confident_success)
            .collect();
        if values.is_empty() {
            return None;
        }
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// The plan's overall prediction: its weakest evaluated phase.
    pub fn predicted_confidence(&self) -> Option<f64> {
        self.phases
            .iter()
            .filter_map(PhaseAssessment::confident_success)
            .reduce(f64::min)
    }

    /// Per-phase predictions in the shape stored in the outcome log.
    pub fn phase_confidences(&self) -> Vec<PhaseConfidence> {
        self.phases
            .iter()
            .filter_map(|p| {
                p.confident_success().map(|c| PhaseConfidence {
                    name: p.name.clone(),
                    predicted_confidence: c,
                })
            })
            .collect()
    }

    /// Outcome record for this plan, once its real outcome is known.
    pub fn to_outcome_record(
        &self,
        plan_file: impl Into<String>,
        actual_outcome: ActualOutcome,
    ) -> OutcomeRecord {
        OutcomeRecord::new(plan_file, self.plan_name.clone(), actual_outcome)
            .with_phases(self.phase_confidences())
    }
}

impl ConfidenceEngine {
    /// Evaluate every phase of `plan` under the profile implied by its impact
    /// level. `config` supplies the multiplier and threshold; resolve it with
    /// `PertConfig::engine_config(plan.impact_level)` to honour the
    /// impact-dependent threshold.
    pub fn assess_plan(&self, plan: &PlanInput, config: &EngineConfig) -> PlanAssessment {
        let profile = plan.impact_level.profile();
        let phases: Vec<PhaseAssessment> = plan
            .phases
            .iter()
            .map(|phase| PhaseAssessment {
                name: phase.name.clone(),
                result: self.evaluate(&phase.risk_factors, profile, config),
            })
            .collect();

        let assessment = PlanAssessment {
            plan_name: plan.plan_name.clone(),
            impact_level: plan.impact_level,
            profile,
            phases,
        };

        tracing::info!(
            event = events::PLAN_EVALUATED,
            plan = %assessment.plan_name,
            phases = assessment.phases.len(),
            passed = assessment.passed_count(),
            evaluated = assessment.evaluated_count(),
            predicted_confidence = ?assessment.predicted_confidence(),
        );

        assessment
    }
}
