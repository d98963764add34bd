//! Core domain types, errors, and configuration for `rampart`.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! arm is the structured, immutable [`Error`].
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` value, its `ErrorCategory`, the `Result` alias
//!   and the `ResultExt` combinators.
//! - **`config`**: `ResilienceConfig`, the closed set of settings handed to the
//!   cache engine and circuit breaker at construction.
//! - **`constants`**: error codes and environment variable names.

pub mod config;
pub mod constants;
pub mod errors;

pub use self::{
    config::ResilienceConfig,
    constants::codes,
    errors::{failure, success, Error, ErrorCategory, Result, ResultExt},
};
