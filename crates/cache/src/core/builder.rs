//! Cache construction

use super::types::{Cache, CacheInner};
use crate::config::CacheConfig;
use crate::entry::CacheEntry;
use crate::storage::{self, Persistence, Restored};
use rampart_core::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an in-memory cache
    ///
    /// Fails with `CACHE_CREATION_FAILED` for a zero capacity and
    /// `INVALID_TTL` for a zero default TTL.
    pub fn create_memory(config: CacheConfig) -> Result<Self> {
        config.validate()?;
        let cache = Self::assemble(config, None);
        cache.start_background_tasks();
        Ok(cache)
    }

    /// Create a cache backed by a snapshot file at `path`
    ///
    /// An existing snapshot is loaded first. Records that expired while the
    /// process was down are dropped, and when the snapshot holds more records
    /// than `max_size` the most recently used ones are kept. A missing file
    /// starts an empty cache; an unreadable or corrupt one fails with
    /// `CACHE_LOAD_FAILED`.
    pub fn create_persistent(path: impl Into<PathBuf>, config: CacheConfig) -> Result<Self>
    where
        V: Serialize + DeserializeOwned,
    {
        config.validate()?;
        let path = path.into();
        let restored = storage::load::<V>(&path, SystemTime::now())?;
        tracing::debug!(path = %path.display(), records = restored.len(), "loaded cache snapshot");

        let cache = Self::assemble(config, Some(Persistence::new(path)));
        cache.restore(restored);
        cache.start_background_tasks();
        Ok(cache)
    }

    fn assemble(config: CacheConfig, persistence: Option<Persistence<V>>) -> Self {
        Self {
            inner: Arc::new(CacheInner::new(config, persistence)),
        }
    }

    /// Insert restored records oldest first, trimming to capacity as we go
    fn restore(&self, records: Vec<Restored<V>>) {
        let now = SystemTime::now();
        let max_size = self.inner.config.max_size;
        let mut store = self.inner.store.lock();
        for record in records {
            store.put(
                record.key,
                CacheEntry {
                    value: record.value,
                    inserted_at: now,
                    expires_at: record.expires_at,
                    last_accessed_at: now,
                },
            );
            if store.len() > max_size {
                store.pop_lru();
            }
        }
    }
}
