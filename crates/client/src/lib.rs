//! Resilient call client for rampart
//!
//! [`ResilientClient`] wraps an async operation with a circuit breaker, an
//! optional retry policy, a per-attempt timeout, and an optional cache for
//! memoising successful results.
//!
//! ```no_run
//! use rampart_client::ResilientClient;
//! use rampart_core::{Error, Result};
//! use rampart_utils::RetryConfig;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<()> {
//! let client = ResilientClient::builder("inventory")
//!     .request_timeout(Duration::from_secs(2))
//!     .retry(RetryConfig::for_network())
//!     .build()?;
//!
//! let stock: u32 = client
//!     .call(|| async { Err(Error::network("inventory", "connection refused")) })
//!     .await?;
//! # let _ = stock;
//! # Ok(())
//! # }
//! ```

mod builder;
mod client;
mod stats;

pub use builder::ResilientClientBuilder;
pub use client::ResilientClient;
pub use stats::ClientStats;
