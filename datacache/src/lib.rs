//! Session-scoped, content-addressed array cache.
//!
//! Arrays (feature columns, label vectors, subset masks, downsample
//! selections) are stored per [`Kind`] and identified by a SHA-256 hash of
//! their contents. Lookups go by name or by hash.
//!
//! # Usage
//!
//! ```
//! use codex_datacache::{Array, DataCache, Kind, MemoryCache};
//!
//! let cache = MemoryCache::new();
//! cache.hash_array("x", Array::Float(vec![1.0, 2.0]), Kind::Feature).unwrap();
//! cache.hash_array("y", Array::Float(vec![3.0, 4.0]), Kind::Feature).unwrap();
//!
//! let hashes = cache.feature_to_hash_list(&["x".into(), "y".into()]).unwrap();
//! let merged = cache.merge_hash_results(&hashes).unwrap();
//! assert_eq!((merged.rows(), merged.cols()), (2, 2));
//! ```

mod array;
mod cache;
mod downsample;
mod error;
pub mod hash;
mod memory;
mod sessions;

pub use array::{Array, CacheEntry, Field, Kind, Matrix};
pub use cache::DataCache;
pub use downsample::downsample;
pub use error::{CacheError, CacheResult};
pub use memory::MemoryCache;
pub use sessions::Sessions;
