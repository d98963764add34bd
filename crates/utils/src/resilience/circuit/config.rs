//! Configuration structs and implementations for retry and circuit breaker behavior.

use super::types::{RetryOn, TripOn};
use rampart_core::{Error, ResilienceConfig, Result};
use rand::Rng;
use std::time::Duration;

/// Default maximum number of retry attempts
const DEFAULT_MAX_RETRIES: usize = 3;

/// Default base delay for exponential backoff (100ms)
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

/// Default maximum delay for exponential backoff (10s)
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(10);

/// Default jitter factor (0.1 = 10% randomization)
const DEFAULT_JITTER_FACTOR: f64 = 0.1;

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first one
    pub max_retries: usize,
    /// Base delay for exponential backoff
    pub base_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Jitter factor for randomization (0.0 to 1.0)
    pub jitter_factor: f64,
    /// Which errors are retried
    pub retry_on: RetryOn,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            jitter_factor: DEFAULT_JITTER_FACTOR,
            retry_on: RetryOn::Network,
        }
    }
}

impl RetryConfig {
    /// Create a retry config for network operations
    pub fn for_network() -> Self {
        Self {
            max_retries: 5,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(30),
            jitter_factor: 0.2,
            retry_on: RetryOn::Network,
        }
    }

    /// A config that never retries
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Check if an error should be retried
    pub fn should_retry(&self, error: &Error) -> bool {
        self.retry_on.matches(error)
    }

    /// Calculate delay for a given attempt with exponential backoff and jitter
    pub fn calculate_delay(&self, attempt: usize) -> Duration {
        let factor = 2u32.saturating_pow(u32::try_from(attempt).unwrap_or(u32::MAX));
        let capped_delay = self.base_delay.saturating_mul(factor).min(self.max_delay);

        // Jitter keeps simultaneous retries from synchronising
        let jitter_factor = self.jitter_factor.clamp(0.0, 1.0);
        if jitter_factor > 0.0 {
            let jitter_range = capped_delay.as_secs_f64() * jitter_factor;
            let jitter = rand::thread_rng().gen_range(-jitter_range..=jitter_range);
            Duration::from_secs_f64((capped_delay.as_secs_f64() + jitter).max(0.0))
        } else {
            capped_delay
        }
    }
}

/// Configuration for circuit breaker behavior
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Number of failures within `monitoring_period` before opening the circuit
    pub failure_threshold: u32,
    /// Time window for counting failures
    pub monitoring_period: Duration,
    /// Duration to wait before admitting a half-open trial
    pub reset_timeout: Duration,
    /// Maximum number of trial calls in half-open state
    pub half_open_trials: u32,
    /// Which errors count as failures
    pub trip_on: TripOn,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self::from(&ResilienceConfig::default())
    }
}

impl From<&ResilienceConfig> for CircuitBreakerConfig {
    fn from(config: &ResilienceConfig) -> Self {
        Self {
            failure_threshold: config.failure_threshold,
            monitoring_period: config.monitoring_period,
            reset_timeout: config.reset_timeout,
            half_open_trials: config.half_open_trials,
            trip_on: TripOn::All,
        }
    }
}

impl CircuitBreakerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.failure_threshold == 0 {
            return Err(Error::invalid_configuration(
                "failure_threshold",
                "failure_threshold must be greater than zero",
            ));
        }
        if self.half_open_trials == 0 {
            return Err(Error::invalid_configuration(
                "half_open_trials",
                "half_open_trials must be greater than zero",
            ));
        }
        if self.monitoring_period.is_zero() {
            return Err(Error::invalid_configuration(
                "monitoring_period",
                "monitoring_period must be greater than zero",
            ));
        }
        Ok(())
    }
}
