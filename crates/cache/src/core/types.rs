//! Core cache types and structures

use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::stats::StatsRecorder;
use crate::storage::Persistence;
use dashmap::DashMap;
use lru::LruCache;
use parking_lot::Mutex;
use rampart_core::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::SystemTime;
use tokio::task::JoinHandle;

/// Bounded LRU cache with per-entry TTL
///
/// Cloning is cheap: every clone shares the same engine. Background tasks
/// and the final snapshot flush stop with the last clone.
pub struct Cache<V> {
    pub(super) inner: Arc<CacheInner<V>>,
}

impl<V> Clone for Cache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

pub(super) struct CacheInner<V> {
    pub config: CacheConfig,
    /// Recency-ordered index; capacity is enforced by the engine, not `lru`
    pub store: Mutex<LruCache<String, CacheEntry<V>>>,
    /// Per-key gates for `get_or_set`
    pub inflight: DashMap<String, Arc<Mutex<()>>>,
    /// Per-key gates for `get_or_set_async`
    pub inflight_async: DashMap<String, Arc<tokio::sync::Mutex<()>>>,
    pub stats: StatsRecorder,
    pub persistence: Option<Persistence<V>>,
    /// Set by every mutation since the last successful flush
    pub dirty: AtomicBool,
    pub background: Mutex<Vec<JoinHandle<()>>>,
}

impl<V> CacheInner<V> {
    pub fn new(config: CacheConfig, persistence: Option<Persistence<V>>) -> Self {
        Self {
            config,
            store: Mutex::new(LruCache::unbounded()),
            inflight: DashMap::new(),
            inflight_async: DashMap::new(),
            stats: StatsRecorder::default(),
            persistence,
            dirty: AtomicBool::new(false),
            background: Mutex::new(Vec::new()),
        }
    }

    pub fn mark_dirty(&self) {
        if self.persistence.is_some() {
            self.dirty.store(true, Ordering::Release);
        }
    }

    /// Write a snapshot if anything changed since the last one
    ///
    /// Encoding happens under the store lock; the file write does not.
    pub fn flush(&self) -> Result<()> {
        let Some(persistence) = &self.persistence else {
            return Ok(());
        };
        if !self.dirty.swap(false, Ordering::AcqRel) {
            return Ok(());
        }

        let encoded = {
            let store = self.store.lock();
            persistence.encode(&store, SystemTime::now())
        };
        let result = encoded.and_then(|bytes| persistence.write(&bytes));
        match &result {
            Ok(()) => tracing::debug!(path = %persistence.path().display(), "flushed cache snapshot"),
            Err(_) => self.dirty.store(true, Ordering::Release),
        }
        result
    }

    /// Drop every expired entry, returning how many went
    pub fn purge_expired(&self) -> usize {
        let now = SystemTime::now();
        let purged: Vec<CacheEntry<V>> = {
            let mut store = self.store.lock();
            let expired: Vec<String> = store
                .iter()
                .filter(|(_, entry)| entry.is_expired(now))
                .map(|(key, _)| key.clone())
                .collect();
            expired.iter().filter_map(|key| store.pop(key)).collect()
        };

        if !purged.is_empty() {
            self.stats.record_expirations(purged.len() as u64);
            self.mark_dirty();
            tracing::debug!(count = purged.len(), "purged expired cache entries");
        }
        purged.len()
    }
}

impl<V> Drop for CacheInner<V> {
    fn drop(&mut self) {
        for handle in self.background.get_mut().drain(..) {
            handle.abort();
        }
        if let Err(e) = self.flush() {
            tracing::warn!(error = %e, "final cache flush failed");
        }
    }
}

impl<V> std::fmt::Debug for Cache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache")
            .field("size", &self.inner.store.lock().len())
            .field("max_size", &self.inner.config.max_size)
            .field(
                "snapshot",
                &self.inner.persistence.as_ref().map(|p| p.path().to_path_buf()),
            )
            .finish()
    }
}
