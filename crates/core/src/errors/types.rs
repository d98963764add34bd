//! Core error type definitions

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result type alias for rampart operations
pub type Result<T> = std::result::Result<T, Error>;

/// Maximum number of links in a causal chain, counting the error itself
pub const MAX_CAUSE_DEPTH: usize = 10;

/// Broad classification of a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    Validation,
    Network,
    Filesystem,
    Configuration,
    Cache,
    Timeout,
    Permission,
    /// Rejected by an open circuit breaker without attempting the call
    CircuitOpen,
    Unknown,
}

/// Structured, immutable failure description
///
/// An `Error` exclusively owns its `cause`, so a causal chain is a tree that
/// can never loop back on itself. The chain is capped at [`MAX_CAUSE_DEPTH`]
/// links when it is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("[{category}] {code}: {message}")]
pub struct Error {
    pub(super) code: String,
    pub(super) message: String,
    pub(super) category: ErrorCategory,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub(super) context: BTreeMap<String, String>,
    #[source]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(super) cause: Option<Box<Error>>,
    /// Milliseconds since the Unix epoch at construction
    pub(super) timestamp: i64,
}

impl Error {
    /// Stable machine-readable code, e.g. `CACHE_MISS`
    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn context(&self) -> &BTreeMap<String, String> {
        &self.context
    }

    /// Look up a single context value
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context.get(key).map(String::as_str)
    }

    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_deref()
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Number of errors in the chain starting at `self` (always at least 1)
    pub fn depth(&self) -> usize {
        self.chain().count()
    }

    /// Iterate over this error followed by each of its causes
    pub fn chain(&self) -> Chain<'_> {
        Chain {
            next: Some(self),
        }
    }

    /// The innermost cause, or `self` when there is none
    pub fn root_cause(&self) -> &Error {
        let mut current = self;
        while let Some(cause) = current.cause() {
            current = cause;
        }
        current
    }

    /// Whether this error or any of its causes carries `code`
    pub fn has_code(&self, code: &str) -> bool {
        self.chain().any(|e| e.code == code)
    }
}

/// Iterator over an error and its causes, outermost first
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<&'a Error>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Error;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.cause();
        Some(current)
    }
}
