//! Shared utilities and resilience primitives for rampart
//!
//! This crate provides the pieces shared by the cache engine and the
//! resilient call client: atomic snapshot writes, logging setup, and the
//! circuit breaker with its retry helpers.

pub mod atomic_file;
pub mod logging;
pub mod resilience;

pub use atomic_file::*;
pub use resilience::*;
