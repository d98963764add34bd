//! Client statistics

use rampart_cache::CacheStats;
use rampart_utils::CircuitBreakerStats;

/// Snapshot of a client's breaker and cache counters
#[derive(Debug, Clone)]
pub struct ClientStats {
    pub name: String,
    pub breaker: CircuitBreakerStats,
    /// `None` when the client has no cache
    pub cache: Option<CacheStats>,
}
