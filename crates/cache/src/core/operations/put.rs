//! Insertion and capacity eviction

use crate::core::types::Cache;
use crate::entry::CacheEntry;
use rampart_core::{Error, Result};
use std::time::{Duration, SystemTime};

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Store `value` under `key`, replacing any previous entry
    ///
    /// `ttl` falls back to the configured default; `None` with no default
    /// never expires. A zero TTL fails with `INVALID_TTL`. Inserting a new
    /// key at capacity evicts the least recently used entry first.
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> Result<()> {
        let ttl = self.resolve_ttl(ttl)?;
        self.insert(key.into(), value, ttl);
        Ok(())
    }

    pub(super) fn resolve_ttl(&self, ttl: Option<Duration>) -> Result<Option<Duration>> {
        match ttl {
            Some(ttl) if ttl.is_zero() => Err(Error::invalid_ttl("ttl must be greater than zero")),
            Some(ttl) => Ok(Some(ttl)),
            None => Ok(self.inner.config.default_ttl),
        }
    }

    /// Insert with an already resolved TTL
    pub(super) fn insert(&self, key: String, value: V, ttl: Option<Duration>) {
        let now = SystemTime::now();
        let displaced = {
            let mut store = self.inner.store.lock();
            let displaced =
                if !store.contains(&key) && store.len() >= self.inner.config.max_size {
                    store.pop_lru()
                } else {
                    None
                };
            store.put(key, CacheEntry::new(value, now, ttl));
            displaced
        };

        self.inner.stats.record_insertion();
        self.inner.mark_dirty();

        if let Some((evicted_key, entry)) = displaced {
            if entry.is_expired(now) {
                self.inner.stats.record_expirations(1);
            } else {
                self.inner.stats.record_eviction();
                tracing::debug!(key = %evicted_key, "evicted least recently used cache entry");
            }
        }
    }
}
