//! Cluster label correspondence.
//!
//! Clustering routines hand back arbitrary ids: re-running k-means on the same
//! data may call yesterday's cluster 2 "cluster 0" today. [`LabelResolver`]
//! renumbers a new labeling so each cluster keeps the id it had in the
//! reference labeling stored in the data cache.
//!
//! # Usage
//!
//! ```
//! use codex_datacache::{Array, DataCache, Kind, MemoryCache};
//! use codex_labels::LabelResolver;
//!
//! let cache = MemoryCache::new();
//! cache.hash_array("dataset", Array::Labels(vec![5, 5, 3, 3]), Kind::Label).unwrap();
//!
//! let out = LabelResolver::default().resolve(&[0, 0, 1, 1], "dataset", &cache);
//! assert_eq!(out, vec![5, 5, 3, 3]);
//! ```
//!
//! # Design
//!
//! Matching is best-effort and never fails. Labelings containing noise
//! ([`NOISE`]) are left alone, as are labelings whose cluster counts differ by
//! more than [`MAX_LABEL_DELTA`]. Anchor sampling is bounded by
//! [`MAX_ANCHOR_ATTEMPTS`]; labels that run out of attempts are filled in
//! afterwards rather than reported.

mod config;
mod swap;

pub use config::{LabelSwapConfig, MAX_ANCHOR_ATTEMPTS, MAX_LABEL_DELTA};
pub use swap::{CorrespondenceMap, LabelResolver, NOISE, Skip, apply, resolve};
