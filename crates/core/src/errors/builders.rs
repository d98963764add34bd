//! Builder methods for creating errors with context

use super::types::{Error, ErrorCategory, MAX_CAUSE_DEPTH};
use crate::constants::codes;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

impl Error {
    /// Create an error with an explicit code and category
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        category: ErrorCategory,
        message: impl Into<String>,
    ) -> Self {
        Error {
            code: code.into(),
            message: message.into(),
            category,
            context: BTreeMap::new(),
            cause: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// Return a copy of this error with one more context entry
    #[must_use]
    pub fn with_context(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.context.insert(key.into(), value.to_string());
        self
    }

    /// Return a copy of this error caused by `cause`
    ///
    /// Any existing cause is replaced. When the resulting chain would be longer
    /// than [`MAX_CAUSE_DEPTH`], the deepest links are dropped.
    #[must_use]
    pub fn with_cause(mut self, cause: Error) -> Self {
        self.cause = Some(Box::new(cause.truncated(MAX_CAUSE_DEPTH - 1)));
        self
    }

    fn truncated(mut self, max_links: usize) -> Self {
        match self.cause.take() {
            Some(cause) if max_links > 1 => {
                self.cause = Some(Box::new(cause.truncated(max_links - 1)));
            }
            _ => {}
        }
        self
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(codes::VALIDATION_ERROR, ErrorCategory::Validation, message)
    }

    /// Create a network error
    #[must_use]
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(codes::NETWORK_ERROR, ErrorCategory::Network, message)
            .with_context("endpoint", endpoint.into())
    }

    /// Create a file system error with context
    #[must_use]
    pub fn file_system(path: impl AsRef<Path>, operation: &str, source: std::io::Error) -> Self {
        Self::from(source)
            .with_context("path", path.as_ref().display())
            .with_context("operation", operation)
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(
            codes::CONFIGURATION_ERROR,
            ErrorCategory::Configuration,
            message,
        )
    }

    /// Create an invalid configuration error for a named field
    #[must_use]
    pub fn invalid_configuration(field: &str, message: impl Into<String>) -> Self {
        Self::new(
            codes::INVALID_CONFIGURATION,
            ErrorCategory::Configuration,
            message,
        )
        .with_context("field", field)
    }

    /// Create a cache error with a specific code
    #[must_use]
    pub fn cache(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, ErrorCategory::Cache, message)
    }

    /// Create a cache miss error
    #[must_use]
    pub fn cache_miss(key: &str) -> Self {
        Self::cache(codes::CACHE_MISS, format!("no live entry for key '{key}'"))
            .with_context("key", key)
    }

    /// Create an invalid TTL error
    #[must_use]
    pub fn invalid_ttl(message: impl Into<String>) -> Self {
        Self::new(codes::INVALID_TTL, ErrorCategory::Validation, message)
    }

    /// Create a timeout error
    #[must_use]
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        let operation = operation.into();
        Self::new(
            codes::TIMEOUT_ERROR,
            ErrorCategory::Timeout,
            format!("operation '{operation}' timed out after {duration:?}"),
        )
        .with_context("operation", operation)
        .with_context("timeout_ms", duration.as_millis())
    }

    /// Create a permission denied error
    #[must_use]
    pub fn permission_denied(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(codes::PERMISSION_DENIED, ErrorCategory::Permission, message)
            .with_context("operation", operation.into())
    }

    /// Create a circuit-open rejection for the named breaker
    #[must_use]
    pub fn circuit_open(name: &str) -> Self {
        Self::new(
            codes::CIRCUIT_OPEN,
            ErrorCategory::CircuitOpen,
            format!("circuit '{name}' is open, call rejected"),
        )
        .with_context("circuit", name)
    }

    /// Create an error of unknown origin
    #[must_use]
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(codes::UNKNOWN_ERROR, ErrorCategory::Unknown, message)
    }
}
