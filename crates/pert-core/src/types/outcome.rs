//! Recorded plan outcomes, the audit trail calibration is built on.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_CONFIDENT_SUCCESS, MIN_CONFIDENT_SUCCESS};

/// What actually happened when the plan was implemented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActualOutcome {
    /// All phases completed as expected.
    Success,
    /// Some phases completed, others failed or were deferred.
    Partial,
    /// Plan abandoned or completely failed.
    Failure,
}

impl ActualOutcome {
    /// Contribution to the success rate. PARTIAL counts as a miss.
    pub fn success_value(&self) -> f64 {
        match self {
            Self::Success => 100.0,
            Self::Partial | Self::Failure => 0.0,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "SUCCESS",
            Self::Partial => "PARTIAL",
            Self::Failure => "FAILURE",
        }
    }
}

impl fmt::Display for ActualOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActualOutcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SUCCESS" => Ok(Self::Success),
            "PARTIAL" => Ok(Self::Partial),
            "FAILURE" => Ok(Self::Failure),
            other => Err(format!("unknown outcome: {other}")),
        }
    }
}

/// Predicted confidence for one phase of a recorded plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseConfidence {
    pub name: String,
    pub predicted_confidence: f64,
}

/// One line of the outcome log. Created once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub plan_file: String,
    pub plan_name: String,
    pub tracked_date: DateTime<Utc>,
    /// Minimum confident success across phases; `None` when unavailable.
    #[serde(default)]
    pub predicted_confidence: Option<f64>,
    #[serde(default)]
    pub phases: Vec<PhaseConfidence>,
    pub actual_outcome: ActualOutcome,
    #[serde(default)]
    pub implementation_duration_hours: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub failure_phase: Option<String>,
}

impl OutcomeRecord {
    /// New record stamped with the current time.
    pub fn new(
        plan_file: impl Into<String>,
        plan_name: impl Into<String>,
        actual_outcome: ActualOutcome,
    ) -> Self {
        Self {
            plan_file: plan_file.into(),
            plan_name: plan_name.into(),
            tracked_date: Utc::now(),
            predicted_confidence: None,
            phases: Vec::new(),
            actual_outcome,
            implementation_duration_hours: None,
            notes: None,
            failure_phase: None,
        }
    }

    /// Attach per-phase predictions. The overall prediction becomes their
    /// minimum, or `None` if the list is empty.
    pub fn with_phases(mut self, phases: Vec<PhaseConfidence>) -> Self {
        self.predicted_confidence = phases
            .iter()
            .map(|p| p.predicted_confidence)
            .reduce(f64::min);
        self.phases = phases;
        self
    }

    /// Override the overall prediction directly.
    pub fn with_predicted_confidence(mut self, confidence: Option<f64>) -> Self {
        self.predicted_confidence = confidence;
        self
    }

    pub fn with_duration_hours(mut self, hours: f64) -> Self {
        self.implementation_duration_hours = Some(hours);
        self
    }

    pub fn with_failure_phase(mut self, phase: impl Into<String>) -> Self {
        self.failure_phase = Some(phase.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_tracked_date(mut self, date: DateTime<Utc>) -> Self {
        self.tracked_date = date;
        self
    }

    /// The overall prediction, if present and one the engine could have made.
    pub fn usable_prediction(&self) -> Option<f64> {
        self.predicted_confidence.filter(|c| is_reachable_confidence(*c))
    }

    /// Reject records carrying predictions outside the engine's output range.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(c) = self.predicted_confidence {
            if !is_reachable_confidence(c) {
                return Err(format!("predicted_confidence {c} is out of range"));
            }
        }
        for phase in &self.phases {
            if !is_reachable_confidence(phase.predicted_confidence) {
                return Err(format!(
                    "predicted_confidence {} for phase {:?} is out of range",
                    phase.predicted_confidence, phase.name
                ));
            }
        }
        Ok(())
    }
}

/// True for finite values within [-250, 100], the range of confident success.
pub fn is_reachable_confidence(value: f64) -> bool {
    value.is_finite() && (MIN_CONFIDENT_SUCCESS..=MAX_CONFIDENT_SUCCESS).contains(&value)
}
