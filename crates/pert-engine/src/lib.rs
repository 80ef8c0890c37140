//! # pert-engine
//!
//! Turns per-factor three-point risk estimates into a phase success
//! probability, confidence interval, and pass/fail verdict.
//!
//! Scoring flows scorer → engine → plan. The engine is stateless: everything
//! it depends on arrives through an explicit [`pert_core::EngineConfig`].

pub mod engine;
pub mod plan;
pub mod scorer;

pub use engine::ConfidenceEngine;
pub use plan::{PhaseAssessment, PhaseInput, PlanAssessment, PlanInput};
pub use scorer::PertFactorScorer;
