use codex_datacache::Matrix;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Outcome of a dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Success,

    /// The routine ran, but part of the request was dropped along the way
    /// (an unresolvable label or subset, for example).
    Degraded,

    /// Dispatch stopped early. `message` says why; other fields hold
    /// whatever was produced before the failure.
    Failure,
}

/// Result record shared by every routine.
///
/// Created by the caller, mutated in place by whichever routine runs and
/// returned at the end of dispatch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmResult {
    pub status: Status,

    #[serde(default)]
    pub message: String,

    /// Plotted output, one row per observation.
    #[serde(default)]
    pub data: Option<Matrix>,

    /// Cluster assignment per observation, for clustering routines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clusters: Option<Vec<i32>>,

    /// Routine-specific scores and statistics.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metrics: Map<String, Value>,

    /// Parts of the request that were dropped.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl AlgorithmResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a dropped part of the request. Never upgrades a failure.
    pub fn degrade(&mut self, warning: impl Into<String>) {
        if self.status == Status::Success {
            self.status = Status::Degraded;
        }
        self.warnings.push(warning.into());
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = Status::Failure;
        self.message = message.into();
    }
}
