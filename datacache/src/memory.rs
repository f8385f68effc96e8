//! In-memory data cache.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::cache::DataCache;
use crate::error::{CacheError, CacheResult};
use crate::hash::content_hash;
use crate::{Array, CacheEntry, Field, Kind, Matrix};

/// A [`DataCache`] holding one insertion-ordered entry list per [`Kind`].
/// Clones share the same underlying lists.
///
/// Label references are replaced by name. Every other kind keeps one entry
/// per distinct content, so a hash stays resolvable after its name is reused;
/// name lookups return the newest entry.
#[derive(Clone, Default)]
pub struct MemoryCache {
    lists: Arc<RwLock<HashMap<Kind, Vec<CacheEntry>>>>,
}

impl MemoryCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries cached under `kind`.
    pub fn len(&self, kind: Kind) -> usize {
        self.lists.read().get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.lists.read().values().all(Vec::is_empty)
    }

    fn lookup(&self, field: Field, value: &str, kind: Kind) -> Option<CacheEntry> {
        let lists = self.lists.read();
        let mut entries = lists.get(&kind)?.iter();
        let found = match field {
            Field::Name => entries.rfind(|e| e.name == value),
            Field::Hash => entries.find(|e| e.hash == value),
        };
        found.cloned()
    }
}

impl DataCache for MemoryCache {
    fn find_hash_array(
        &self,
        field: Field,
        value: &str,
        kind: Kind,
    ) -> CacheResult<Option<CacheEntry>> {
        Ok(self.lookup(field, value, kind))
    }

    fn feature_to_hash_list(&self, features: &[String]) -> CacheResult<Vec<String>> {
        features
            .iter()
            .map(|name| {
                self.lookup(Field::Name, name, Kind::Feature)
                    .map(|e| e.hash)
                    .ok_or_else(|| CacheError::NotFound {
                        kind: Kind::Feature,
                        name: name.clone(),
                    })
            })
            .collect()
    }

    fn merge_hash_results(&self, hashes: &[String]) -> CacheResult<Matrix> {
        if hashes.is_empty() {
            return Err(CacheError::EmptyInput);
        }
        let mut parts = Vec::with_capacity(hashes.len());
        for hash in hashes {
            let entry = self
                .lookup(Field::Hash, hash, Kind::Feature)
                .ok_or_else(|| CacheError::NotFound {
                    kind: Kind::Feature,
                    name: hash.clone(),
                })?;
            let m = entry.data.to_matrix().ok_or_else(|| CacheError::TypeMismatch {
                name: entry.name.clone(),
                found: entry.data.type_name(),
                want: "float",
            })?;
            parts.push(m);
        }
        Matrix::hstack(&parts)
    }

    fn hash_array(&self, name: &str, data: Array, kind: Kind) -> CacheResult<CacheEntry> {
        if data.is_empty() {
            return Err(CacheError::EmptyInput);
        }
        let entry = CacheEntry {
            hash: content_hash(kind, &data),
            name: name.to_string(),
            kind,
            samples: data.len(),
            data,
        };

        let mut lists = self.lists.write();
        let list = lists.entry(kind).or_default();
        let stale = list.iter().position(|e| {
            e.name == name && (kind == Kind::Label || e.hash == entry.hash)
        });
        if let Some(i) = stale {
            list.remove(i);
        }
        list.push(entry.clone());
        debug!(kind = %kind, name, hash = %entry.hash, samples = entry.samples, "datacache: stored array");
        Ok(entry)
    }

    fn reset_cache_list(&self, kind: Kind) -> CacheResult<()> {
        self.lists.write().remove(&kind);
        Ok(())
    }
}
