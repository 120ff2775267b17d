//! Explicit query cache.
//!
//! The browser original kept a global client-side cache keyed by query name
//! and invalidated it ambiently on every mutation. Here the cache is a
//! plain object passed by handle: callers decide what is cached and when it
//! is invalidated, and nothing happens behind their back.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;

/// Keyed cache of computed query results.
///
/// Values are cloned out; wrap expensive payloads in `Arc`.
#[derive(Debug)]
pub struct QueryCache<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> QueryCache<K, V>
where
    K: Clone + Eq + Hash + core::fmt::Debug,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().ok()?;
        let hit = map.get(key).cloned();
        tracing::debug!(?key, hit = hit.is_some(), "query cache lookup");
        hit
    }

    pub fn put(&self, key: K, value: V) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(key, value);
        }
    }

    /// Return the cached value or compute, store, and return it.
    ///
    /// The compute closure may fail; failures are not cached.
    pub fn get_or_insert_with<E>(
        &self,
        key: K,
        compute: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        let value = compute()?;
        self.put(key, value.clone());
        Ok(value)
    }

    pub fn invalidate(&self, key: &K) {
        if let Ok(mut map) = self.inner.write() {
            if map.remove(key).is_some() {
                tracing::debug!(?key, "query cache invalidated");
            }
        }
    }

    pub fn invalidate_all(&self) {
        if let Ok(mut map) = self.inner.write() {
            tracing::debug!(entries = map.len(), "query cache cleared");
            map.clear();
        }
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> Default for QueryCache<K, V>
where
    K: Clone + Eq + Hash + core::fmt::Debug,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
