use crate::error::CacheResult;
use crate::{Array, CacheEntry, Field, Kind, Matrix};

/// Content-addressed array store scoped to one session.
///
/// Implementations must be safe for concurrent use. Callers take no locks of
/// their own; any per-key discipline is the implementation's job.
pub trait DataCache: Send + Sync {
    /// Returns the entry of `kind` whose `field` equals `value`. By name this
    /// is the most recently stored entry.
    fn find_hash_array(&self, field: Field, value: &str, kind: Kind)
        -> CacheResult<Option<CacheEntry>>;

    /// Resolves feature names to their content hashes, preserving order.
    /// Fails if any feature is not cached.
    fn feature_to_hash_list(&self, features: &[String]) -> CacheResult<Vec<String>>;

    /// Column-stacks the cached feature arrays identified by `hashes` into
    /// one observation-by-feature matrix.
    fn merge_hash_results(&self, hashes: &[String]) -> CacheResult<Matrix>;

    /// Stores `data` under `name` in `kind` and returns the stored entry.
    /// A [`Kind::Label`] entry replaces the one stored under the same name;
    /// other kinds keep older content under the name reachable by hash.
    fn hash_array(&self, name: &str, data: Array, kind: Kind) -> CacheResult<CacheEntry>;

    /// Drops every entry of `kind`.
    fn reset_cache_list(&self, kind: Kind) -> CacheResult<()>;
}
