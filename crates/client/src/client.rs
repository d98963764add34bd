//! Guarded call execution

use crate::builder::ResilientClientBuilder;
use crate::stats::ClientStats;
use rampart_cache::{Cache, CacheConfig};
use rampart_core::{Error, ResilienceConfig, Result};
use rampart_utils::{retry, CircuitBreaker, RetryConfig};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Runs async operations behind a circuit breaker
///
/// Each [`call`](Self::call) takes one breaker admission, runs the
/// operation (retrying it when a retry policy is set) with every attempt
/// bounded by the request timeout, and settles the admission exactly once.
/// Clones share the breaker and cache.
pub struct ResilientClient<V = ()> {
    name: String,
    breaker: Arc<CircuitBreaker>,
    request_timeout: Duration,
    retry: Option<RetryConfig>,
    cache: Option<Cache<V>>,
}

impl ResilientClient<()> {
    pub fn builder(name: impl Into<String>) -> ResilientClientBuilder<()> {
        ResilientClientBuilder::new(name)
    }
}

impl<V> ResilientClient<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Build a client and its in-memory cache from shared settings
    pub fn from_config(name: impl Into<String>, config: &ResilienceConfig) -> Result<Self> {
        config.validate()?;
        let cache = Cache::create_memory(CacheConfig::from(config))?;
        ResilientClientBuilder::new(name)
            .config(config)
            .cache(cache)
            .build()
    }

    /// Run `operation` through the cache, calling it only on a miss
    ///
    /// Concurrent callers for the same key share one underlying call. Hits
    /// never touch the breaker, and failures are not cached. Without a cache
    /// this is the same as [`call`](Self::call).
    pub async fn call_cached<F, Fut>(&self, key: &str, operation: F) -> Result<V>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<V>>,
    {
        match &self.cache {
            Some(cache) => {
                cache
                    .get_or_set_async(key, || self.call(operation))
                    .await
            }
            None => self.call(operation).await,
        }
    }

    pub fn cache(&self) -> Option<&Cache<V>> {
        self.cache.as_ref()
    }

    pub fn stats(&self) -> ClientStats {
        ClientStats {
            name: self.name.clone(),
            breaker: self.breaker.stats(),
            cache: self.cache.as_ref().map(Cache::stats),
        }
    }
}

impl<V> ResilientClient<V> {
    pub(crate) fn from_parts(
        name: String,
        breaker: Arc<CircuitBreaker>,
        request_timeout: Duration,
        retry: Option<RetryConfig>,
        cache: Option<Cache<V>>,
    ) -> Self {
        Self {
            name,
            breaker,
            request_timeout,
            retry,
            cache,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Run `operation` under the breaker, retry policy and request timeout
    ///
    /// Fails with `CIRCUIT_OPEN` without invoking `operation` when the
    /// breaker rejects the call. An attempt that outlives the request
    /// timeout is dropped and fails with `TIMEOUT_ERROR`.
    pub async fn call<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let permit = self.breaker.try_acquire()?;
        let result = match &self.retry {
            Some(config) => retry(config, || self.attempt(&operation)).await,
            None => self.attempt(&operation).await,
        };

        if let Err(e) = &result {
            tracing::debug!(client = %self.name, error = %e, "guarded call failed");
        }
        permit.record(&result);
        result
    }

    async fn attempt<F, Fut, T>(&self, operation: &F) -> Result<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.request_timeout, operation()).await {
            Ok(result) => result,
            Err(_) => {
                tracing::warn!(
                    client = %self.name,
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "call attempt timed out"
                );
                Err(Error::timeout(self.name.as_str(), self.request_timeout))
            }
        }
    }
}

impl<V> Clone for ResilientClient<V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            breaker: Arc::clone(&self.breaker),
            request_timeout: self.request_timeout,
            retry: self.retry.clone(),
            cache: self.cache.clone(),
        }
    }
}

impl<V> std::fmt::Debug for ResilientClient<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResilientClient")
            .field("name", &self.name)
            .field("breaker", &self.breaker)
            .field("request_timeout", &self.request_timeout)
            .field("retry", &self.retry)
            .field("cached", &self.cache.is_some())
            .finish()
    }
}
