//! Introspection, sweeping and flushing

use crate::config::CacheConfig;
use crate::core::types::Cache;
use crate::stats::CacheStats;
use rampart_core::Result;
use std::path::Path;
use std::time::SystemTime;

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Number of stored entries, including expired ones not yet dropped
    pub fn size(&self) -> usize {
        self.inner.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn config(&self) -> &CacheConfig {
        &self.inner.config
    }

    /// Live keys from least to most recently used
    pub fn keys(&self) -> Vec<String> {
        let now = SystemTime::now();
        self.inner
            .store
            .lock()
            .iter()
            .rev()
            .filter(|(_, entry)| !entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Drop every expired entry now instead of waiting for a lookup
    pub fn purge_expired(&self) -> usize {
        self.inner.purge_expired()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner
            .stats
            .snapshot(self.size(), self.inner.config.max_size)
    }

    /// Snapshot file path for persistent caches
    pub fn snapshot_path(&self) -> Option<&Path> {
        self.inner.persistence.as_ref().map(|p| p.path())
    }

    /// Write a snapshot now
    ///
    /// A no-op for in-memory caches and when nothing changed since the last
    /// flush. Fails with `CACHE_WRITE_FAILED` when the snapshot cannot be
    /// written; the next flush retries.
    pub fn flush(&self) -> Result<()> {
        self.inner.flush()
    }
}
