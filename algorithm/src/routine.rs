//! Routine interface and registry.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use codex_datacache::DataCache;
use serde_json::{Map, Value};

use crate::AlgorithmType;
use crate::error::{DispatchError, RoutineError};
use crate::result::AlgorithmResult;

/// Everything a routine is handed besides the result record and cache.
/// Same shape for every routine family.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineInput {
    /// Identity of the merged feature matrix.
    pub input_hash: String,
    pub active_labels: Option<Value>,
    pub features: Vec<String>,
    /// Per-feature identities, aligned with `features`.
    pub hash_list: Vec<String>,
    pub label_hash: Option<String>,
    pub subset_hash: Option<String>,
    pub algorithm_name: String,
    pub downsampled: Option<usize>,
    pub parameters: Map<String, Value>,
    pub scoring: Option<String>,
    pub search_type: String,
    pub cross_val: Option<Value>,
    pub exclude_selections: bool,
}

impl RoutineInput {
    /// Same inputs, different algorithm and hyperparameters.
    pub fn with_algorithm(&self, name: &str, parameters: Map<String, Value>) -> Self {
        Self {
            algorithm_name: name.to_string(),
            parameters,
            ..self.clone()
        }
    }
}

/// One statistical routine (a clustering algorithm, a projection, a
/// regression, ...).
///
/// Implementations read their inputs through `cache`, write their output
/// into `result` and report failures as errors; `result` may be left
/// partially filled when they do.
pub trait Routine: Send + Sync {
    fn run(
        &self,
        input: &RoutineInput,
        result: &mut AlgorithmResult,
        cache: &dyn DataCache,
    ) -> Result<(), RoutineError>;
}

/// Maps each [`AlgorithmType`] to the routine serving it.
#[derive(Default)]
pub struct Routines {
    routes: HashMap<AlgorithmType, Arc<dyn Routine>>,
}

impl Routines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, kind: AlgorithmType, r: Arc<dyn Routine>) -> Result<(), DispatchError> {
        if self.routes.contains_key(&kind) {
            return Err(DispatchError::AlreadyRegistered(kind));
        }
        self.routes.insert(kind, r);
        Ok(())
    }

    pub fn get(&self, kind: AlgorithmType) -> Result<&dyn Routine, DispatchError> {
        self.routes
            .get(&kind)
            .map(|r| r.as_ref())
            .ok_or(DispatchError::RoutineNotRegistered(kind))
    }

    pub fn contains(&self, kind: AlgorithmType) -> bool {
        self.routes.contains_key(&kind)
    }

    pub fn run(
        &self,
        kind: AlgorithmType,
        input: &RoutineInput,
        result: &mut AlgorithmResult,
        cache: &dyn DataCache,
    ) -> Result<(), DispatchError> {
        self.get(kind)?
            .run(input, result, cache)
            .map_err(|source| DispatchError::Routine { kind, source })
    }
}

impl fmt::Debug for Routines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.routes.keys().map(AlgorithmType::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("Routines").field("kinds", &kinds).finish()
    }
}
