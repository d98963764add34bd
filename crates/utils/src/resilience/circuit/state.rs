//! Circuit breaker state management and execution logic.

use super::config::CircuitBreakerConfig;
use super::metrics::BreakerMetrics;
use super::transitions::{self, Admission, Transition};
use super::types::{CircuitBreakerState, CircuitBreakerStats, CircuitPhase};
use parking_lot::Mutex;
use rampart_core::{Error, Result};
use std::future::Future;
use std::time::Instant;

/// Circuit breaker implementation
///
/// All decisions read and update one [`CircuitBreakerState`] under a single
/// mutex, so phase transitions are totally ordered and two callers can never
/// both take the last half-open trial slot. The lock is never held across an
/// `.await`.
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    state: Mutex<CircuitBreakerState>,
    metrics: BreakerMetrics,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with the given configuration
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self::named("default", config)
    }

    /// Create a named circuit breaker; the name shows up in logs and errors
    pub fn named(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            state: Mutex::new(CircuitBreakerState::new(Instant::now())),
            metrics: BreakerMetrics::new(),
        }
    }

    /// Create a named circuit breaker after validating its configuration
    pub fn try_named(name: impl Into<String>, config: CircuitBreakerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::named(name, config))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Current phase, without triggering the Open to HalfOpen move
    pub fn phase(&self) -> CircuitPhase {
        self.state.lock().phase
    }

    /// Ask for permission to make one call
    ///
    /// Fails with `CIRCUIT_OPEN` when the call must not be attempted. The
    /// returned permit must be settled with the call's outcome; dropping it
    /// unsettled gives back any half-open trial slot it held.
    pub fn try_acquire(&self) -> Result<CallPermit<'_>> {
        let (admission, change) = {
            let mut state = self.state.lock();
            transitions::admit(&mut state, &self.config, Instant::now())
        };
        if let Some(change) = change {
            self.on_transition(change);
        }

        match admission {
            Admission::Admitted { generation, trial } => {
                self.metrics.record_admitted();
                Ok(CallPermit {
                    breaker: self,
                    generation,
                    trial,
                    settled: false,
                })
            }
            Admission::Rejected => {
                self.metrics.record_rejection();
                tracing::debug!(circuit = %self.name, "call rejected by open circuit");
                Err(Error::circuit_open(&self.name))
            }
        }
    }

    /// Execute an operation through the circuit breaker
    ///
    /// The operation is not invoked at all when the circuit rejects the call.
    pub async fn call<F, Fut, T>(&self, operation: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let permit = self.try_acquire()?;
        let result = operation().await;
        permit.record(&result);
        result
    }

    /// Get current circuit breaker statistics
    pub fn stats(&self) -> CircuitBreakerStats {
        let state = {
            let mut state = self.state.lock();
            transitions::prune_failures(&mut state, &self.config, Instant::now());
            state.clone()
        };
        CircuitBreakerStats {
            phase: state.phase,
            failure_count: state.failure_count,
            half_open_trials_remaining: state.half_open_trials_remaining,
            since_last_transition: state.last_transition_at.elapsed(),
            total_calls: self.metrics.total_calls(),
            successes: self.metrics.successes(),
            failures: self.metrics.failures(),
            rejections: self.metrics.rejections(),
            transitions: self.metrics.transitions(),
        }
    }

    /// Force the circuit closed and clear its failure count
    pub fn reset(&self) {
        let change = {
            let mut state = self.state.lock();
            transitions::reset(&mut state, &self.config, Instant::now())
        };
        if let Some(change) = change {
            self.on_transition(change);
        }
    }

    fn settle(&self, generation: u64, success: bool) {
        let change = {
            let mut state = self.state.lock();
            let now = Instant::now();
            if success {
                transitions::record_success(&mut state, &self.config, generation, now)
            } else {
                transitions::record_failure(&mut state, &self.config, generation, now)
            }
        };

        if success {
            self.metrics.record_success();
        } else {
            self.metrics.record_failure();
        }
        if let Some(change) = change {
            self.on_transition(change);
        }
    }

    fn release(&self, generation: u64) {
        let mut state = self.state.lock();
        transitions::release_trial(&mut state, &self.config, generation);
    }

    fn on_transition(&self, change: Transition) {
        self.metrics.record_transition();
        match change.to {
            CircuitPhase::Open => tracing::warn!(
                circuit = %self.name,
                from = %change.from,
                reset_timeout_ms = self.config.reset_timeout.as_millis() as u64,
                "circuit breaker opened"
            ),
            CircuitPhase::HalfOpen => tracing::info!(
                circuit = %self.name,
                trials = self.config.half_open_trials,
                "circuit breaker half-open, probing recovery"
            ),
            CircuitPhase::Closed => tracing::info!(
                circuit = %self.name,
                from = %change.from,
                "circuit breaker closed"
            ),
        }
    }
}

impl std::fmt::Debug for CircuitBreaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CircuitBreaker")
            .field("name", &self.name)
            .field("phase", &self.phase())
            .field("config", &self.config)
            .finish()
    }
}

/// Permission to make one call through a [`CircuitBreaker`]
#[must_use = "a permit must be settled with the call's outcome"]
pub struct CallPermit<'a> {
    breaker: &'a CircuitBreaker,
    generation: u64,
    trial: bool,
    settled: bool,
}

impl CallPermit<'_> {
    /// Whether this call is a half-open recovery probe
    pub fn is_trial(&self) -> bool {
        self.trial
    }

    pub fn record_success(mut self) {
        self.settled = true;
        self.breaker.settle(self.generation, true);
    }

    pub fn record_failure(mut self) {
        self.settled = true;
        self.breaker.settle(self.generation, false);
    }

    /// Settle using the breaker's classification of `result`
    pub fn record<T>(self, result: &Result<T>) {
        let failed = match result {
            Ok(_) => false,
            Err(error) => self.breaker.config.trip_on.counts(error),
        };
        if failed {
            self.record_failure();
        } else {
            self.record_success();
        }
    }
}

impl Drop for CallPermit<'_> {
    fn drop(&mut self) {
        if !self.settled && self.trial {
            self.breaker.release(self.generation);
        }
    }
}
