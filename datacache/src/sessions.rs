use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::MemoryCache;

/// Hands out one [`MemoryCache`] per session key.
///
/// This replaces an ambient, process-wide cache: callers hold a `Sessions`
/// value and pass the per-session handle into whatever needs it.
#[derive(Default)]
pub struct Sessions {
    caches: Mutex<HashMap<String, Arc<MemoryCache>>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cache for `session`, creating it on first use.
    pub fn get_cache(&self, session: &str) -> Arc<MemoryCache> {
        let mut caches = self.caches.lock();
        caches
            .entry(session.to_string())
            .or_insert_with(|| Arc::new(MemoryCache::new()))
            .clone()
    }

    /// Forgets a session. Outstanding handles stay valid until dropped.
    pub fn drop_session(&self, session: &str) -> bool {
        self.caches.lock().remove(session).is_some()
    }

    pub fn len(&self) -> usize {
        self.caches.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Array, DataCache, Kind};

    #[test]
    fn same_key_same_cache() {
        let sessions = Sessions::new();
        let a = sessions.get_cache("s1");
        a.hash_array("x", Array::Float(vec![1.0]), Kind::Feature).unwrap();

        let again = sessions.get_cache("s1");
        assert_eq!(again.len(Kind::Feature), 1);

        let other = sessions.get_cache("s2");
        assert_eq!(other.len(Kind::Feature), 0);
        assert_eq!(sessions.len(), 2);
    }

    #[test]
    fn drop_session_starts_fresh() {
        let sessions = Sessions::new();
        sessions
            .get_cache("s")
            .hash_array("x", Array::Float(vec![1.0]), Kind::Feature)
            .unwrap();
        assert!(sessions.drop_session("s"));
        assert!(!sessions.drop_session("s"));
        assert!(sessions.is_empty());
        assert!(sessions.get_cache("s").is_empty());
    }
}
