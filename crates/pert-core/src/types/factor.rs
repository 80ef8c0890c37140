//! Risk factor keys and the per-phase factor input map.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::estimate::{RawEstimate, ThreePointEstimate};

/// One of the five fixed risk factors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKey {
    /// Algorithm/logic difficulty, edge cases.
    Complexity,
    /// External libraries, APIs, version compatibility.
    Dependencies,
    /// Tested vs. untested on the current system.
    StackCompat,
    /// Familiar vs. novel territory.
    Knowledge,
    /// Verification feasibility, test complexity.
    Testing,
}

impl FactorKey {
    pub const ALL: [FactorKey; 5] = [
        FactorKey::Complexity,
        FactorKey::Dependencies,
        FactorKey::StackCompat,
        FactorKey::Knowledge,
        FactorKey::Testing,
    ];

    /// Wire name of the factor.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complexity => "complexity",
            Self::Dependencies => "dependencies",
            Self::StackCompat => "stack_compat",
            Self::Knowledge => "knowledge",
            Self::Testing => "testing",
        }
    }
}

impl fmt::Display for FactorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FactorKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complexity" => Ok(Self::Complexity),
            "dependencies" => Ok(Self::Dependencies),
            "stack_compat" | "stack" => Ok(Self::StackCompat),
            "knowledge" => Ok(Self::Knowledge),
            "testing" => Ok(Self::Testing),
            other => Err(format!("unknown risk factor: {other}")),
        }
    }
}

/// Per-phase risk factor estimates, keyed by factor name.
///
/// Keys are kept as strings so inputs carrying factors this version does not
/// know about still deserialize; the engine ignores them. Values are raw
/// triples and are validated only for the factors a profile requires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FactorInputs(BTreeMap<String, RawEstimate>);

impl FactorInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of a known factor.
    pub fn with(mut self, key: FactorKey, estimate: impl Into<RawEstimate>) -> Self {
        self.insert(key.as_str(), estimate);
        self
    }

    /// Insert under an arbitrary key.
    pub fn insert(&mut self, key: impl Into<String>, estimate: impl Into<RawEstimate>) {
        self.0.insert(key.into(), estimate.into());
    }

    /// Raw triple for a known factor, if present.
    pub fn get(&self, key: FactorKey) -> Option<RawEstimate> {
        self.0.get(key.as_str()).copied()
    }

    pub fn contains(&self, key: FactorKey) -> bool {
        self.0.contains_key(key.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys that do not name a known factor.
    pub fn unrecognized_keys(&self) -> impl Iterator<Item = &str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|k| k.parse::<FactorKey>().is_err())
    }
}

impl FromIterator<(FactorKey, ThreePointEstimate)> for FactorInputs {
    fn from_iter<I: IntoIterator<Item = (FactorKey, ThreePointEstimate)>>(iter: I) -> Self {
        let mut inputs = Self::new();
        for (key, estimate) in iter {
            inputs.insert(key.as_str(), estimate);
        }
        inputs
    }
}
