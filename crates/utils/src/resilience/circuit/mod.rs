//! Resilience patterns for error recovery including retry logic and circuit breakers
//!
//! This module provides reusable utilities for handling transient failures
//! and protecting against cascading failures in remote calls.
//!
//! ## Architecture
//!
//! - [`types`] - Phases, the breaker state record, failure/retry classifiers
//! - [`config`] - Configuration structs for retry and circuit breaker behavior
//! - [`metrics`] - Call counters
//! - [`transitions`] - Pure state transition functions
//! - [`state`] - The circuit breaker and its call permits
//! - [`retry`] - Retry with exponential backoff
//!
//! ## Examples
//!
//! ### Circuit Breaker
//!
//! ```rust,no_run
//! use rampart_utils::resilience::circuit::{CircuitBreaker, CircuitBreakerConfig};
//!
//! # async fn example() -> rampart_core::Result<String> {
//! let cb = CircuitBreaker::named("billing", CircuitBreakerConfig::default());
//!
//! let result = cb.call(|| async {
//!     // Your operation here
//!     Ok("success".to_string())
//! }).await;
//! result
//! # }
//! ```
//!
//! ### Retry inside one breaker admission
//!
//! ```rust,no_run
//! use rampart_utils::resilience::circuit::{
//!     retry_with_circuit_breaker, CircuitBreaker, CircuitBreakerConfig, RetryConfig,
//! };
//!
//! # async fn example() -> rampart_core::Result<String> {
//! let cb = CircuitBreaker::new(CircuitBreakerConfig::default());
//!
//! let result = retry_with_circuit_breaker(&RetryConfig::for_network(), &cb, || async {
//!     Ok("success".to_string())
//! }).await;
//! result
//! # }
//! ```

pub mod config;
pub mod metrics;
pub mod retry;
pub mod state;
pub mod transitions;
pub mod types;

// Re-export public API
pub use config::{CircuitBreakerConfig, RetryConfig};
pub use retry::{retry, retry_with_circuit_breaker};
pub use state::{CallPermit, CircuitBreaker};
pub use types::{CircuitBreakerState, CircuitBreakerStats, CircuitPhase, RetryOn, TripOn};
