//! Cache engine for rampart
//!
//! A bounded key/value store with least-recently-used eviction and per-entry
//! time-to-live. Handles are cheap to clone and share one engine.
//!
//! ```no_run
//! use rampart_cache::{Cache, CacheConfig};
//! use std::time::Duration;
//!
//! # fn main() -> rampart_core::Result<()> {
//! let cache: Cache<String> = Cache::create_memory(CacheConfig::with_max_size(128))?;
//! cache.set("greeting", "hello".to_string(), Some(Duration::from_secs(60)))?;
//! assert_eq!(cache.get("greeting")?, "hello");
//! # Ok(())
//! # }
//! ```
//!
//! [`Cache::create_persistent`] additionally snapshots the entries to a file,
//! restoring them on the next start.

pub mod config;
pub mod core;
pub mod stats;
pub mod storage;

mod entry;

pub use config::CacheConfig;
pub use core::Cache;
pub use stats::CacheStats;
