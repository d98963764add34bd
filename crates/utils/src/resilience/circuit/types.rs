//! Core types and enums for circuit breaker functionality.

use rampart_core::{codes, Error, ErrorCategory};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Circuit breaker phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircuitPhase {
    /// Calls pass through normally
    Closed,
    /// Calls fail immediately
    Open,
    /// A limited number of trial calls probe recovery
    HalfOpen,
}

impl std::fmt::Display for CircuitPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitPhase::Closed => f.write_str("closed"),
            CircuitPhase::Open => f.write_str("open"),
            CircuitPhase::HalfOpen => f.write_str("half-open"),
        }
    }
}

/// The breaker's single mutable record
///
/// Only the functions in [`super::transitions`] change it, always while the
/// owning breaker's lock is held.
#[derive(Debug, Clone)]
pub struct CircuitBreakerState {
    pub phase: CircuitPhase,
    /// Failures counted in the sliding monitoring window
    pub failure_count: u32,
    /// When each counted failure happened, oldest first
    pub recent_failures: VecDeque<Instant>,
    pub last_transition_at: Instant,
    pub half_open_trials_remaining: u32,
    /// Bumped on every transition; outcomes carrying an older value are ignored
    pub generation: u64,
}

impl CircuitBreakerState {
    pub fn new(now: Instant) -> Self {
        Self {
            phase: CircuitPhase::Closed,
            failure_count: 0,
            recent_failures: VecDeque::new(),
            last_transition_at: now,
            half_open_trials_remaining: 0,
            generation: 0,
        }
    }
}

/// Which errors count as breaker failures
///
/// Errors that do not trip the breaker are recorded as successes: the
/// downstream answered, even if the answer was a rejection.
#[derive(Clone, Default)]
pub enum TripOn {
    /// Every error counts
    #[default]
    All,
    /// Network, timeout and filesystem errors count
    Transient,
    /// Custom predicate
    Custom(Arc<dyn Fn(&Error) -> bool + Send + Sync>),
}

impl TripOn {
    pub fn counts(&self, error: &Error) -> bool {
        match self {
            TripOn::All => true,
            TripOn::Transient => matches!(
                error.category(),
                ErrorCategory::Network | ErrorCategory::Timeout | ErrorCategory::Filesystem
            ),
            TripOn::Custom(predicate) => predicate(error),
        }
    }
}

impl std::fmt::Debug for TripOn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripOn::All => write!(f, "TripOn::All"),
            TripOn::Transient => write!(f, "TripOn::Transient"),
            TripOn::Custom(_) => write!(f, "TripOn::Custom(<predicate>)"),
        }
    }
}

/// Which errors should trigger a retry
#[derive(Clone, Default)]
pub enum RetryOn {
    /// Retry on all errors except circuit-open rejections
    All,
    /// Retry only on `NETWORK_ERROR`
    #[default]
    Network,
    /// Retry on network and timeout errors
    Transient,
    /// Custom retry predicate
    Custom(Arc<dyn Fn(&Error) -> bool + Send + Sync>),
}

impl RetryOn {
    pub fn matches(&self, error: &Error) -> bool {
        match self {
            RetryOn::All => error.category() != ErrorCategory::CircuitOpen,
            RetryOn::Network => error.code() == codes::NETWORK_ERROR,
            RetryOn::Transient => {
                error.code() == codes::NETWORK_ERROR || error.code() == codes::TIMEOUT_ERROR
            }
            RetryOn::Custom(predicate) => predicate(error),
        }
    }
}

impl std::fmt::Debug for RetryOn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RetryOn::All => write!(f, "RetryOn::All"),
            RetryOn::Network => write!(f, "RetryOn::Network"),
            RetryOn::Transient => write!(f, "RetryOn::Transient"),
            RetryOn::Custom(_) => write!(f, "RetryOn::Custom(<predicate>)"),
        }
    }
}

/// Point-in-time view of a circuit breaker
#[derive(Debug, Clone)]
pub struct CircuitBreakerStats {
    pub phase: CircuitPhase,
    pub failure_count: u32,
    pub half_open_trials_remaining: u32,
    pub since_last_transition: Duration,
    pub total_calls: u64,
    pub successes: u64,
    pub failures: u64,
    pub rejections: u64,
    pub transitions: u64,
}
