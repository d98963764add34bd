//! State transition logic for circuit breaker.
//!
//! These functions are pure with respect to time: the caller passes `now`
//! and holds the breaker lock for the whole decide-then-update step.

use super::config::CircuitBreakerConfig;
use super::types::{CircuitBreakerState, CircuitPhase};
use std::time::Instant;

/// A phase change, reported so the caller can log it after unlocking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: CircuitPhase,
    pub to: CircuitPhase,
}

/// Result of asking the breaker to admit a call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Admitted {
        generation: u64,
        /// Whether the call consumed a half-open trial slot
        trial: bool,
    },
    Rejected,
}

fn transition(
    state: &mut CircuitBreakerState,
    config: &CircuitBreakerConfig,
    to: CircuitPhase,
    now: Instant,
) -> Option<Transition> {
    let from = state.phase;
    if from == to {
        return None;
    }

    state.phase = to;
    state.last_transition_at = now;
    state.generation += 1;
    match to {
        CircuitPhase::Closed => {
            clear_failures(state);
            state.half_open_trials_remaining = 0;
        }
        CircuitPhase::Open => {
            state.half_open_trials_remaining = 0;
        }
        CircuitPhase::HalfOpen => {
            state.half_open_trials_remaining = config.half_open_trials;
        }
    }
    Some(Transition { from, to })
}

fn clear_failures(state: &mut CircuitBreakerState) {
    state.recent_failures.clear();
    state.failure_count = 0;
}

/// Drop failures older than `monitoring_period` and refresh `failure_count`
pub fn prune_failures(
    state: &mut CircuitBreakerState,
    config: &CircuitBreakerConfig,
    now: Instant,
) {
    while let Some(&oldest) = state.recent_failures.front() {
        if now.saturating_duration_since(oldest) < config.monitoring_period {
            break;
        }
        state.recent_failures.pop_front();
    }
    state.failure_count = state.recent_failures.len() as u32;
}

/// Decide whether a call may proceed, moving Open to HalfOpen once the reset
/// timeout has elapsed
pub fn admit(
    state: &mut CircuitBreakerState,
    config: &CircuitBreakerConfig,
    now: Instant,
) -> (Admission, Option<Transition>) {
    let mut change = None;

    if state.phase == CircuitPhase::Open
        && now.saturating_duration_since(state.last_transition_at) >= config.reset_timeout
    {
        change = transition(state, config, CircuitPhase::HalfOpen, now);
    }

    let admission = match state.phase {
        CircuitPhase::Closed => Admission::Admitted {
            generation: state.generation,
            trial: false,
        },
        CircuitPhase::Open => Admission::Rejected,
        CircuitPhase::HalfOpen => {
            if state.half_open_trials_remaining > 0 {
                state.half_open_trials_remaining -= 1;
                Admission::Admitted {
                    generation: state.generation,
                    trial: true,
                }
            } else {
                Admission::Rejected
            }
        }
    };

    (admission, change)
}

/// Record a successful call admitted under `generation`
pub fn record_success(
    state: &mut CircuitBreakerState,
    config: &CircuitBreakerConfig,
    generation: u64,
    now: Instant,
) -> Option<Transition> {
    if generation != state.generation {
        return None;
    }

    match state.phase {
        CircuitPhase::Closed => None,
        CircuitPhase::HalfOpen => transition(state, config, CircuitPhase::Closed, now),
        CircuitPhase::Open => None,
    }
}

/// Record a failed call admitted under `generation`
pub fn record_failure(
    state: &mut CircuitBreakerState,
    config: &CircuitBreakerConfig,
    generation: u64,
    now: Instant,
) -> Option<Transition> {
    if generation != state.generation {
        return None;
    }

    match state.phase {
        CircuitPhase::Closed => {
            state.recent_failures.push_back(now);
            prune_failures(state, config, now);

            if state.failure_count >= config.failure_threshold {
                transition(state, config, CircuitPhase::Open, now)
            } else {
                None
            }
        }
        CircuitPhase::HalfOpen => transition(state, config, CircuitPhase::Open, now),
        CircuitPhase::Open => None,
    }
}

/// Give back a trial slot held by a call that finished without an outcome
pub fn release_trial(
    state: &mut CircuitBreakerState,
    config: &CircuitBreakerConfig,
    generation: u64,
) {
    if generation == state.generation
        && state.phase == CircuitPhase::HalfOpen
        && state.half_open_trials_remaining < config.half_open_trials
    {
        state.half_open_trials_remaining += 1;
    }
}

/// Force the breaker closed
pub fn reset(
    state: &mut CircuitBreakerState,
    config: &CircuitBreakerConfig,
    now: Instant,
) -> Option<Transition> {
    let change = transition(state, config, CircuitPhase::Closed, now);
    clear_failures(state);
    change
}
