//! Lookups

use crate::core::types::Cache;
use rampart_core::{Error, Result};
use std::time::SystemTime;

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Get a clone of the value stored under `key`
    ///
    /// A hit promotes the entry to most recently used. Absent and expired
    /// keys fail with `CACHE_MISS`; an expired entry is removed on the way.
    pub fn get(&self, key: &str) -> Result<V> {
        match self.lookup(key) {
            Some(value) => {
                self.inner.stats.record_hit();
                tracing::trace!(key, "cache hit");
                Ok(value)
            }
            None => {
                self.inner.stats.record_miss();
                tracing::debug!(key, "cache miss");
                Err(Error::cache_miss(key))
            }
        }
    }

    /// Whether a live entry exists for `key`, without touching its recency
    pub fn has(&self, key: &str) -> bool {
        let now = SystemTime::now();
        let expired = {
            let mut store = self.inner.store.lock();
            match store.peek(key).map(|entry| entry.is_expired(now)) {
                Some(true) => store.pop(key),
                Some(false) => return true,
                None => return false,
            }
        };

        if expired.is_some() {
            self.inner.stats.record_expirations(1);
            self.inner.mark_dirty();
        }
        false
    }
}
