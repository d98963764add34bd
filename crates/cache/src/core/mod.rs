//! Cache engine
//!
//! One `parking_lot::Mutex` guards the recency index so that every
//! check-then-act (capacity eviction, lazy expiry, recency promotion) is
//! atomic. Values are cloned out of the lock; nothing awaits while holding it.

mod builder;
mod cleanup;
mod operations;
mod types;

pub use types::Cache;

#[cfg(test)]
mod tests;
