use codex_datacache::hash::combine_keys;
use codex_datacache::{Array, DataCache, Field, Kind, Sessions};
use codex_labels::LabelResolver;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::DispatchError;
use crate::request::Request;
use crate::result::{AlgorithmResult, Status};
use crate::routine::{RoutineInput, Routines};
use crate::AlgorithmType;

/// Name the merged feature matrix is cached under.
pub const MERGED_NAME: &str = "Merged";

/// Message set on the result when `algorithmType` is not recognized.
pub const UNKNOWN_TYPE_MESSAGE: &str = "Cannot parse algorithmType";

/// Routes requests to registered routines.
///
/// Clustering requests also run the configured projection (PCA to two
/// components by default): cluster assignments come from the clustering
/// routine, plotted positions from the projection. The assignments are then
/// aligned with the previous run on the same data.
#[derive(Debug)]
pub struct Dispatcher {
    routines: Routines,
    resolver: LabelResolver,
    cfg: Config,
}

impl Dispatcher {
    pub fn new(routines: Routines, cfg: Config) -> Self {
        Self {
            resolver: LabelResolver::new(cfg.labels),
            routines,
            cfg,
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Runs `request` and returns `result` as the routine left it.
    ///
    /// Anticipated failures (cache misses, unregistered or failing routines)
    /// are logged and recorded on the result with [`Status::Failure`]; they
    /// are never returned as errors. Panics are not caught.
    pub fn dispatch(
        &self,
        request: &Request,
        mut result: AlgorithmResult,
        cache: &dyn DataCache,
    ) -> AlgorithmResult {
        if let Err(e) = self.try_dispatch(request, &mut result, cache) {
            warn!(
                algorithm = %request.algorithm_name,
                kind = %request.algorithm_type,
                error = %e,
                "algorithm: dispatch failed"
            );
            result.fail(e.to_string());
        }
        result
    }

    /// Parses a wire request and dispatches it. Parse failures are handled
    /// like any other dispatch failure.
    pub fn dispatch_value(
        &self,
        msg: &Value,
        mut result: AlgorithmResult,
        cache: &dyn DataCache,
    ) -> AlgorithmResult {
        match Request::from_value(msg) {
            Ok(request) => self.dispatch(&request, result, cache),
            Err(e) => {
                warn!(error = %e, "algorithm: dispatch failed");
                result.fail(e.to_string());
                result
            }
        }
    }

    /// Dispatches `request` against the cache of its `sessionkey`, creating
    /// the session on first use.
    pub fn dispatch_session(
        &self,
        request: &Request,
        result: AlgorithmResult,
        sessions: &Sessions,
    ) -> AlgorithmResult {
        let cache = sessions.get_cache(&request.session_key);
        self.dispatch(request, result, cache.as_ref())
    }

    fn try_dispatch(
        &self,
        request: &Request,
        result: &mut AlgorithmResult,
        cache: &dyn DataCache,
    ) -> Result<(), DispatchError> {
        let Ok(kind) = request.algorithm_type.parse::<AlgorithmType>() else {
            debug!(kind = %request.algorithm_type, "algorithm: unknown algorithm type");
            result.status = Status::Failure;
            result.message = UNKNOWN_TYPE_MESSAGE.to_string();
            return Ok(());
        };

        let hash_list = cache.feature_to_hash_list(&request.data_features)?;

        let subset_hash = match request.subset_name() {
            Some(name) => {
                let hash = lookup_hash(cache, name, Kind::Subset);
                if hash.is_none() {
                    result.degrade(format!("subset '{name}' not found"));
                }
                hash
            }
            None => None,
        };

        // TODO: decide whether an unknown label name should fail the request
        // instead of degrading it.
        let label_hash = match request.label_name.as_deref() {
            Some(name) => {
                let hash = lookup_hash(cache, name, Kind::Feature);
                if hash.is_none() {
                    result.degrade(format!("label '{name}' not found"));
                }
                hash
            }
            None => None,
        };

        let merged = cache.merge_hash_results(&hash_list)?;
        let input_hash = cache
            .hash_array(MERGED_NAME, Array::Matrix(merged), Kind::Feature)?
            .hash;

        let input = RoutineInput {
            input_hash,
            active_labels: request.active_labels.clone(),
            features: request.data_features.clone(),
            hash_list,
            label_hash,
            subset_hash,
            algorithm_name: request.algorithm_name.clone(),
            downsampled: request.downsampled,
            parameters: request.parameters.clone(),
            scoring: request.scoring.clone(),
            search_type: request.search_type.clone(),
            cross_val: request.cross_val.clone(),
            exclude_selections: request.exclude_data_selections,
        };

        debug!(
            %kind,
            algorithm = %input.algorithm_name,
            input = %input.input_hash,
            "algorithm: dispatching"
        );
        match kind {
            AlgorithmType::Clustering => self.cluster(&input, result, cache),
            other => self.routines.run(other, &input, result, cache),
        }
    }

    fn cluster(
        &self,
        input: &RoutineInput,
        result: &mut AlgorithmResult,
        cache: &dyn DataCache,
    ) -> Result<(), DispatchError> {
        let mut params = Map::new();
        params.insert(
            "n_components".to_string(),
            Value::from(self.cfg.projection.components),
        );
        let projection_input = input.with_algorithm(&self.cfg.projection.algorithm, params);

        // Projection output stays apart from whatever the clustering routine writes.
        let mut projection = result.clone();
        self.routines.run(
            AlgorithmType::DimensionalityReduction,
            &projection_input,
            &mut projection,
            cache,
        )?;

        self.routines
            .run(AlgorithmType::Clustering, input, result, cache)?;
        result.data = projection.data;

        if !self.cfg.relabel_clusters {
            return Ok(());
        }
        let Some(labels) = result.clusters.take() else {
            return Ok(());
        };

        let key = label_key(input);
        let resolved = self.resolver.resolve(&labels, &key, cache);
        if self.cfg.store_labels {
            if let Err(e) = cache.hash_array(&key, Array::Labels(resolved.clone()), Kind::Label) {
                warn!(key = %key, error = %e, "algorithm: storing reference labels failed");
            }
        }
        result.clusters = Some(resolved);
        Ok(())
    }
}

/// Identity the reference labeling of a clustering run is stored under.
///
/// Runs over a subset, or over a downsampled view, label a different set of
/// observations than the full merged matrix and get their own key.
pub fn label_key(input: &RoutineInput) -> String {
    if input.subset_hash.is_none() && input.downsampled.is_none() {
        return input.input_hash.clone();
    }
    let subset = input.subset_hash.as_deref().unwrap_or("");
    let mode = if input.exclude_selections { "exclude" } else { "include" };
    let downsampled = input.downsampled.map(|n| n.to_string()).unwrap_or_default();
    combine_keys(&[&input.input_hash, subset, mode, &downsampled])
}

/// Resolves a name to its hash, treating lookup failures as absent.
fn lookup_hash(cache: &dyn DataCache, name: &str, kind: Kind) -> Option<String> {
    match cache.find_hash_array(Field::Name, name, kind) {
        Ok(Some(entry)) => Some(entry.hash),
        Ok(None) => {
            debug!(name, %kind, "algorithm: reference not found, continuing without it");
            None
        }
        Err(e) => {
            warn!(name, %kind, error = %e, "algorithm: reference lookup failed, continuing without it");
            None
        }
    }
}
