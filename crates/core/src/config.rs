//! Immutable configuration consumed by the cache engine and circuit breaker
//!
//! Loading configuration from files is left to the embedding application;
//! this module only defines the closed set of recognised fields, their
//! defaults, and the validation applied once at construction. Durations are
//! exchanged as integer milliseconds so that external sources can be
//! validated for negative values before they ever become a [`Duration`].

use crate::constants::*;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_MAX_SIZE: usize = 1000;
const DEFAULT_FAILURE_THRESHOLD: u32 = 5;
const DEFAULT_MONITORING_PERIOD: Duration = Duration::from_secs(60);
const DEFAULT_RESET_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_HALF_OPEN_TRIALS: u32 = 1;
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings shared by the cache engine, circuit breaker and call client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawResilienceConfig", into = "RawResilienceConfig")]
pub struct ResilienceConfig {
    /// Maximum number of live cache entries
    pub max_size: usize,
    /// TTL applied to cache entries written without an explicit one
    pub ttl: Option<Duration>,
    /// Failures within `monitoring_period` that open the circuit
    pub failure_threshold: u32,
    /// Window over which breaker failures are counted
    pub monitoring_period: Duration,
    /// Time an open circuit waits before admitting a trial call
    pub reset_timeout: Duration,
    /// Trial calls admitted while half-open
    pub half_open_trials: u32,
    /// Deadline for a single attempt of a wrapped call
    pub request_timeout: Duration,
}

impl Default for ResilienceConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            ttl: None,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            monitoring_period: DEFAULT_MONITORING_PERIOD,
            reset_timeout: DEFAULT_RESET_TIMEOUT,
            half_open_trials: DEFAULT_HALF_OPEN_TRIALS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ResilienceConfig {
    /// Check every field, returning the first violation found
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(Error::invalid_configuration(
                "max_size",
                "max_size must be greater than zero",
            ));
        }
        if self.ttl == Some(Duration::ZERO) {
            return Err(Error::invalid_ttl("ttl must be greater than zero when set"));
        }
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
        for (field, value) in [
            ("monitoring_period", self.monitoring_period),
            ("reset_timeout", self.reset_timeout),
            ("request_timeout", self.request_timeout),
        ] {
            if value.is_zero() {
                return Err(Error::invalid_configuration(
                    field,
                    format!("{field} must be greater than zero"),
                ));
            }
        }
        Ok(())
    }

    /// Parse and validate a JSON document using the `*_ms` field names
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            Error::invalid_configuration("<document>", format!("invalid configuration: {e}"))
        })?;
        Ok(config)
    }

    /// Start from the defaults and apply any `RAMPART_*` environment overrides
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Self::from_env`] but reading from an arbitrary lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut raw = RawResilienceConfig::from(Self::default());

        if let Some(v) = lookup(RAMPART_MAX_SIZE_VAR) {
            raw.max_size = parse_var(RAMPART_MAX_SIZE_VAR, &v)?;
        }
        if let Some(v) = lookup(RAMPART_TTL_MS_VAR) {
            raw.ttl_ms = Some(parse_var(RAMPART_TTL_MS_VAR, &v)?);
        }
        if let Some(v) = lookup(RAMPART_FAILURE_THRESHOLD_VAR) {
            raw.failure_threshold = parse_var(RAMPART_FAILURE_THRESHOLD_VAR, &v)?;
        }
        if let Some(v) = lookup(RAMPART_MONITORING_PERIOD_MS_VAR) {
            raw.monitoring_period_ms = parse_var(RAMPART_MONITORING_PERIOD_MS_VAR, &v)?;
        }
        if let Some(v) = lookup(RAMPART_RESET_TIMEOUT_MS_VAR) {
            raw.reset_timeout_ms = parse_var(RAMPART_RESET_TIMEOUT_MS_VAR, &v)?;
        }
        if let Some(v) = lookup(RAMPART_HALF_OPEN_TRIALS_VAR) {
            raw.half_open_trials = parse_var(RAMPART_HALF_OPEN_TRIALS_VAR, &v)?;
        }
        if let Some(v) = lookup(RAMPART_REQUEST_TIMEOUT_MS_VAR) {
            raw.request_timeout_ms = parse_var(RAMPART_REQUEST_TIMEOUT_MS_VAR, &v)?;
        }

        let config = Self::try_from(raw)?;
        tracing::debug!(?config, "loaded resilience configuration");
        Ok(config)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        Error::invalid_configuration(name, format!("cannot parse {name}={value:?}"))
    })
}

/// Wire form of [`ResilienceConfig`] with millisecond integer durations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawResilienceConfig {
    max_size: usize,
    ttl_ms: Option<i64>,
    failure_threshold: u32,
    monitoring_period_ms: i64,
    reset_timeout_ms: i64,
    half_open_trials: u32,
    request_timeout_ms: i64,
}

impl Default for RawResilienceConfig {
    fn default() -> Self {
        Self::from(ResilienceConfig::default())
    }
}

impl From<ResilienceConfig> for RawResilienceConfig {
    fn from(config: ResilienceConfig) -> Self {
        Self {
            max_size: config.max_size,
            ttl_ms: config.ttl.map(duration_to_ms),
            failure_threshold: config.failure_threshold,
            monitoring_period_ms: duration_to_ms(config.monitoring_period),
            reset_timeout_ms: duration_to_ms(config.reset_timeout),
            half_open_trials: config.half_open_trials,
            request_timeout_ms: duration_to_ms(config.request_timeout),
        }
    }
}

impl TryFrom<RawResilienceConfig> for ResilienceConfig {
    type Error = Error;

    fn try_from(raw: RawResilienceConfig) -> Result<Self> {
        let ttl = match raw.ttl_ms {
            Some(ms) if ms < 0 => {
                return Err(Error::invalid_ttl(format!("ttl_ms must not be negative, got {ms}"))
                    .with_context("field", "ttl_ms"));
            }
            Some(ms) => Some(Duration::from_millis(ms as u64)),
            None => None,
        };

        let config = Self {
            max_size: raw.max_size,
            ttl,
            failure_threshold: raw.failure_threshold,
            monitoring_period: ms_to_duration("monitoring_period_ms", raw.monitoring_period_ms)?,
            reset_timeout: ms_to_duration("reset_timeout_ms", raw.reset_timeout_ms)?,
            half_open_trials: raw.half_open_trials,
            request_timeout: ms_to_duration("request_timeout_ms", raw.request_timeout_ms)?,
        };
        config.validate()?;
        Ok(config)
    }
}

fn ms_to_duration(field: &str, ms: i64) -> Result<Duration> {
    if ms < 0 {
        return Err(Error::invalid_configuration(
            field,
            format!("{field} must not be negative, got {ms}"),
        ));
    }
    Ok(Duration::from_millis(ms as u64))
}

fn duration_to_ms(duration: Duration) -> i64 {
    i64::try_from(duration.as_millis()).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::codes;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let config = ResilienceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_size, 1000);
        assert_eq!(config.ttl, None);
    }

    #[test]
    fn test_json_uses_millisecond_fields() {
        let config = ResilienceConfig::from_json_str(
            r#"{ "max_size": 2, "ttl_ms": 100, "failure_threshold": 3, "reset_timeout_ms": 250 }"#,
        )
        .unwrap();

        assert_eq!(config.max_size, 2);
        assert_eq!(config.ttl, Some(Duration::from_millis(100)));
        assert_eq!(config.failure_threshold, 3);
        assert_eq!(config.reset_timeout, Duration::from_millis(250));
        assert_eq!(config.monitoring_period, DEFAULT_MONITORING_PERIOD);
    }

    #[test]
    fn test_negative_ttl_is_rejected() {
        let error: Error = serde_json::from_str::<ResilienceConfig>(r#"{ "ttl_ms": -5 }"#)
            .map_err(|e| Error::validation(e.to_string()))
            .unwrap_err();
        assert!(error.message().contains("ttl_ms must not be negative"));

        let raw = RawResilienceConfig {
            ttl_ms: Some(-1),
            ..RawResilienceConfig::default()
        };
        let error = ResilienceConfig::try_from(raw).unwrap_err();
        assert_eq!(error.code(), codes::INVALID_TTL);
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let error = ResilienceConfig::from_json_str(r#"{ "max_sise": 3 }"#).unwrap_err();
        assert_eq!(error.code(), codes::INVALID_CONFIGURATION);
    }

    #[test]
    fn test_zero_max_size_is_rejected() {
        let config = ResilienceConfig {
            max_size: 0,
            ..Default::default()
        };
        let error = config.validate().unwrap_err();
        assert_eq!(error.code(), codes::INVALID_CONFIGURATION);
        assert_eq!(error.context_value("field"), Some("max_size"));
    }

    #[test]
    fn test_lookup_overrides_defaults() {
        let vars: HashMap<&str, &str> = [
            (RAMPART_FAILURE_THRESHOLD_VAR, "3"),
            (RAMPART_REQUEST_TIMEOUT_MS_VAR, " 1500 "),
        ]
        .into_iter()
        .collect();

        let config =
            ResilienceConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.failure_threshold, 3);
        assert_eq!(config.request_timeout, Duration::from_millis(1500));
        assert_eq!(config.max_size, DEFAULT_MAX_SIZE);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let error = ResilienceConfig::from_lookup(|name| {
            (name == RAMPART_MAX_SIZE_VAR).then(|| "lots".to_string())
        })
        .unwrap_err();
        assert_eq!(error.context_value("field"), Some(RAMPART_MAX_SIZE_VAR));
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = ResilienceConfig {
            ttl: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"ttl_ms\":5000"));
        assert_eq!(ResilienceConfig::from_json_str(&json).unwrap(), config);
    }
}
