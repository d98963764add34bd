//! Cache configuration and validation

use rampart_core::{codes, Error, ResilienceConfig, Result};
use std::time::Duration;

/// Default interval between background snapshot flushes
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(30);

/// Configuration for a cache engine instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries held at once
    pub max_size: usize,
    /// TTL for entries written without an explicit one; `None` never expires
    pub default_ttl: Option<Duration>,
    /// Background flush period for persistent caches; `None` disables it
    pub flush_interval: Option<Duration>,
    /// Background sweep of expired entries; `None` relies on lazy expiry only
    pub sweep_interval: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::from(&ResilienceConfig::default())
    }
}

impl From<&ResilienceConfig> for CacheConfig {
    fn from(config: &ResilienceConfig) -> Self {
        Self {
            max_size: config.max_size,
            default_ttl: config.ttl,
            flush_interval: Some(DEFAULT_FLUSH_INTERVAL),
            sweep_interval: None,
        }
    }
}

impl CacheConfig {
    /// A config holding at most `max_size` entries with no default TTL
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            max_size,
            ..Self::default()
        }
    }

    /// Check the configuration, mapping violations to cache creation errors
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(Error::cache(
                codes::CACHE_CREATION_FAILED,
                "max_size must be greater than zero",
            )
            .with_context("field", "max_size"));
        }
        if self.default_ttl == Some(Duration::ZERO) {
            return Err(Error::invalid_ttl("default_ttl must be greater than zero"));
        }
        for (field, interval) in [
            ("flush_interval", self.flush_interval),
            ("sweep_interval", self.sweep_interval),
        ] {
            if interval == Some(Duration::ZERO) {
                return Err(Error::cache(
                    codes::CACHE_CREATION_FAILED,
                    format!("{field} must be greater than zero when set"),
                )
                .with_context("field", field));
            }
        }
        Ok(())
    }
}
