//! Single-flight population
//!
//! Concurrent `get_or_set` callers for one key serialise on a per-key gate
//! and re-check the store once inside it, so the factory runs at most once
//! per miss. Gates are dropped from the registry when the last waiter leaves.

use crate::core::types::Cache;
use rampart_core::Result;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Return the cached value for `key` or compute, store and return it
    ///
    /// A failed factory stores nothing and its error is returned; the next
    /// caller runs the factory again. The factory must not call `get_or_set`
    /// for the same key.
    pub fn get_or_set<F>(&self, key: &str, factory: F) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        self.get_or_set_with_ttl(key, None, factory)
    }

    /// [`Cache::get_or_set`] with an explicit TTL for the stored value
    pub fn get_or_set_with_ttl<F>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        factory: F,
    ) -> Result<V>
    where
        F: FnOnce() -> Result<V>,
    {
        let ttl = self.resolve_ttl(ttl)?;
        if let Some(value) = self.cached(key) {
            return Ok(value);
        }

        let gate = Arc::clone(self.inner.inflight.entry(key.to_owned()).or_default().value());
        let result = {
            let _guard = gate.lock();
            match self.cached(key) {
                Some(value) => Ok(value),
                None => self.populate(key, ttl, factory()),
            }
        };

        drop(gate);
        self.inner
            .inflight
            .remove_if(key, |_, gate| Arc::strong_count(gate) == 1);
        result
    }

    /// Async counterpart of [`Cache::get_or_set`]
    ///
    /// Waiters for the same key park on a `tokio::sync::Mutex` instead of
    /// blocking a worker thread.
    pub async fn get_or_set_async<F, Fut>(&self, key: &str, factory: F) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        self.get_or_set_async_with_ttl(key, None, factory).await
    }

    /// [`Cache::get_or_set_async`] with an explicit TTL for the stored value
    pub async fn get_or_set_async_with_ttl<F, Fut>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        factory: F,
    ) -> Result<V>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        let ttl = self.resolve_ttl(ttl)?;
        if let Some(value) = self.cached(key) {
            return Ok(value);
        }

        let gate = Arc::clone(
            self.inner
                .inflight_async
                .entry(key.to_owned())
                .or_default()
                .value(),
        );
        let result = {
            let _guard = gate.lock().await;
            match self.cached(key) {
                Some(value) => Ok(value),
                None => {
                    let produced = factory().await;
                    self.populate(key, ttl, produced)
                }
            }
        };

        drop(gate);
        self.inner
            .inflight_async
            .remove_if(key, |_, gate| Arc::strong_count(gate) == 1);
        result
    }

    fn cached(&self, key: &str) -> Option<V> {
        let value = self.lookup(key)?;
        self.inner.stats.record_hit();
        Some(value)
    }

    fn populate(&self, key: &str, ttl: Option<Duration>, produced: Result<V>) -> Result<V> {
        self.inner.stats.record_miss();
        match produced {
            Ok(value) => {
                self.insert(key.to_owned(), value.clone(), ttl);
                Ok(value)
            }
            Err(e) => {
                tracing::debug!(key, error = %e, "cache factory failed, nothing stored");
                Err(e)
            }
        }
    }
}
