//! Client construction

use crate::client::ResilientClient;
use rampart_cache::Cache;
use rampart_core::{Error, ResilienceConfig, Result};
use rampart_utils::{CircuitBreaker, CircuitBreakerConfig, RetryConfig};
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`ResilientClient`]
///
/// Starts from the [`ResilienceConfig`] defaults with no retries and no
/// cache. Attaching a cache fixes the client's cached value type.
#[derive(Debug)]
pub struct ResilientClientBuilder<V = ()> {
    name: String,
    breaker: CircuitBreakerConfig,
    request_timeout: Duration,
    retry: Option<RetryConfig>,
    cache: Option<Cache<V>>,
}

impl ResilientClientBuilder<()> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        let defaults = ResilienceConfig::default();
        Self {
            name: name.into(),
            breaker: CircuitBreakerConfig::from(&defaults),
            request_timeout: defaults.request_timeout,
            retry: None,
            cache: None,
        }
    }
}

impl<V> ResilientClientBuilder<V> {
    /// Take breaker thresholds and the request timeout from shared settings
    pub fn config(mut self, config: &ResilienceConfig) -> Self {
        let trip_on = self.breaker.trip_on.clone();
        self.breaker = CircuitBreakerConfig {
            trip_on,
            ..CircuitBreakerConfig::from(config)
        };
        self.request_timeout = config.request_timeout;
        self
    }

    pub fn breaker_config(mut self, config: CircuitBreakerConfig) -> Self {
        self.breaker = config;
        self
    }

    /// Upper bound for each individual attempt
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Retry failed attempts inside a single breaker admission
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = Some(config);
        self
    }

    /// Memoise successful results of [`ResilientClient::call_cached`]
    pub fn cache<W>(self, cache: Cache<W>) -> ResilientClientBuilder<W> {
        ResilientClientBuilder {
            name: self.name,
            breaker: self.breaker,
            request_timeout: self.request_timeout,
            retry: self.retry,
            cache: Some(cache),
        }
    }

    /// Validate the settings and build the client
    pub fn build(self) -> Result<ResilientClient<V>> {
        if self.request_timeout.is_zero() {
            return Err(Error::invalid_configuration(
                "request_timeout",
                "request_timeout must be greater than zero",
            ));
        }
        let breaker = CircuitBreaker::try_named(self.name.clone(), self.breaker)?;

        tracing::debug!(
            client = %self.name,
            request_timeout_ms = self.request_timeout.as_millis() as u64,
            retries = self.retry.as_ref().map_or(0, |r| r.max_retries),
            cached = self.cache.is_some(),
            "built resilient client"
        );

        Ok(ResilientClient::from_parts(
            self.name,
            Arc::new(breaker),
            self.request_timeout,
            self.retry,
            self.cache,
        ))
    }
}
