use std::collections::{BTreeMap, BTreeSet};

use codex_datacache::{DataCache, Field, Kind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::LabelSwapConfig;

/// Label marking an observation as unclustered (density-based noise).
pub const NOISE: i32 = -1;

/// New-run label -> reference-run label.
pub type CorrespondenceMap = BTreeMap<i32, i32>;

/// Why a labeling was left as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Skip {
    #[error("no reference labels")]
    NoReference,

    #[error("noise label present")]
    Noise,

    #[error("label counts too far apart: reference {reference}, new {new}")]
    TooDifferent { reference: usize, new: usize },
}

/// Renumbers cluster labels so a re-run keeps the ids of the run before it.
///
/// The reference labeling for a dataset lives in the data cache under
/// [`Kind::Label`], named by the dataset identity.
#[derive(Debug, Clone, Default)]
pub struct LabelResolver {
    cfg: LabelSwapConfig,
}

impl LabelResolver {
    pub fn new(cfg: LabelSwapConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &LabelSwapConfig {
        &self.cfg
    }

    /// Relabels `new_labels` against the reference stored for `dataset_key`.
    ///
    /// Never fails: a missing or unusable reference, a cache error, noise
    /// labels or too large a change in cluster count all return
    /// `new_labels` unchanged.
    pub fn resolve(
        &self,
        new_labels: &[i32],
        dataset_key: &str,
        cache: &dyn DataCache,
    ) -> Vec<i32> {
        let entry = match cache.find_hash_array(Field::Name, dataset_key, Kind::Label) {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                debug!(dataset_key, "labels: no reference labeling");
                return new_labels.to_vec();
            }
            Err(e) => {
                warn!(dataset_key, error = %e, "labels: reference lookup failed");
                return new_labels.to_vec();
            }
        };
        let Some(reference) = entry.data.as_labels() else {
            debug!(
                dataset_key,
                found = entry.data.type_name(),
                "labels: reference is not a label vector"
            );
            return new_labels.to_vec();
        };
        self.relabel(new_labels, reference)
    }

    /// Relabels `new_labels` against an explicit reference labeling.
    pub fn relabel(&self, new_labels: &[i32], reference: &[i32]) -> Vec<i32> {
        match self.correspond(new_labels, reference) {
            Ok(map) => apply(&map, new_labels),
            Err(skip @ Skip::TooDifferent { .. }) => {
                info!(reason = %skip, "labels: leaving labels unchanged");
                new_labels.to_vec()
            }
            Err(skip) => {
                debug!(reason = %skip, "labels: leaving labels unchanged");
                new_labels.to_vec()
            }
        }
    }

    /// Builds the correspondence map from `new_labels` to `reference`.
    ///
    /// Each distinct new label, in ascending order, anchors on the reference
    /// label found at a randomly sampled position it occupies. A sample whose
    /// reference label is already claimed is retried, up to
    /// `max_attempts` times. Labels left without an anchor take the lowest
    /// unclaimed reference label, or a fresh one above every claimed label.
    pub fn correspond(
        &self,
        new_labels: &[i32],
        reference: &[i32],
    ) -> Result<CorrespondenceMap, Skip> {
        if reference.is_empty() {
            return Err(Skip::NoReference);
        }
        let new_ids: BTreeSet<i32> = new_labels.iter().copied().collect();
        let ref_ids: BTreeSet<i32> = reference.iter().copied().collect();

        if new_ids.contains(&NOISE) || ref_ids.contains(&NOISE) {
            return Err(Skip::Noise);
        }
        if ref_ids.len().abs_diff(new_ids.len()) > self.cfg.max_label_delta {
            return Err(Skip::TooDifferent {
                reference: ref_ids.len(),
                new: new_ids.len(),
            });
        }

        let mut rng = self.rng();
        let overlap = new_labels.len().min(reference.len());
        let mut map = CorrespondenceMap::new();
        let mut claimed = BTreeSet::new();

        for &k in &new_ids {
            let positions: Vec<usize> = (0..overlap).filter(|&i| new_labels[i] == k).collect();
            for _ in 0..self.cfg.max_attempts {
                let Some(&pos) = positions.choose(&mut *rng) else {
                    break;
                };
                let candidate = reference[pos];
                if claimed.insert(candidate) {
                    map.insert(k, candidate);
                    break;
                }
            }
        }

        let anchored = map.len();
        let mut unclaimed: Vec<i32> = ref_ids.difference(&claimed).copied().collect();
        unclaimed.reverse();
        for &k in &new_ids {
            if map.contains_key(&k) {
                continue;
            }
            let target = match unclaimed.pop() {
                Some(id) => id,
                None => fresh_label(&claimed),
            };
            claimed.insert(target);
            map.insert(k, target);
        }

        debug!(
            labels = new_ids.len(),
            anchored,
            filled = map.len() - anchored,
            "labels: built correspondence"
        );
        Ok(map)
    }

    fn rng(&self) -> Box<dyn RngCore> {
        match self.cfg.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::thread_rng()),
        }
    }
}

/// One above the largest claimed label, or the smallest free non-negative
/// label when that would overflow.
fn fresh_label(claimed: &BTreeSet<i32>) -> i32 {
    let Some(&max) = claimed.last() else {
        return 0;
    };
    max.checked_add(1)
        .or_else(|| (0..i32::MAX).find(|id| !claimed.contains(id)))
        .unwrap_or(i32::MIN)
}

/// Relabels `labels` through `map`. Labels missing from the map are kept.
pub fn apply(map: &CorrespondenceMap, labels: &[i32]) -> Vec<i32> {
    labels
        .iter()
        .map(|l| map.get(l).copied().unwrap_or(*l))
        .collect()
}

/// [`LabelResolver::resolve`] with the default configuration.
pub fn resolve(new_labels: &[i32], dataset_key: &str, cache: &dyn DataCache) -> Vec<i32> {
    LabelResolver::default().resolve(new_labels, dataset_key, cache)
}
