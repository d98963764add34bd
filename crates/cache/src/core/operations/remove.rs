//! Removal

use crate::core::types::Cache;
use lru::LruCache;
use std::time::SystemTime;

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Remove `key`, returning whether a live entry was removed
    pub fn remove(&self, key: &str) -> bool {
        let Some(entry) = self.inner.store.lock().pop(key) else {
            return false;
        };
        self.inner.mark_dirty();

        if entry.is_expired(SystemTime::now()) {
            self.inner.stats.record_expirations(1);
            false
        } else {
            self.inner.stats.record_removal();
            true
        }
    }

    /// Remove every entry; calling it on an empty cache is a no-op
    pub fn clear(&self) {
        let cleared = std::mem::replace(&mut *self.inner.store.lock(), LruCache::unbounded());
        if !cleared.is_empty() {
            self.inner.mark_dirty();
            tracing::debug!(entries = cleared.len(), "cleared cache");
        }
    }
}
