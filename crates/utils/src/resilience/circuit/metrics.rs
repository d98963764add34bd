//! Call counters for circuit breaker statistics.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic counters updated outside the breaker lock
#[derive(Debug, Default)]
pub struct BreakerMetrics {
    total_calls: AtomicU64,
    successes: AtomicU64,
    failures: AtomicU64,
    rejections: AtomicU64,
    transitions: AtomicU64,
}

impl BreakerMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_admitted(&self) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.total_calls.fetch_add(1, Ordering::Relaxed);
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_success(&self) {
        self.successes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transition(&self) {
        self.transitions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn total_calls(&self) -> u64 {
        self.total_calls.load(Ordering::Relaxed)
    }

    pub fn successes(&self) -> u64 {
        self.successes.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }

    pub fn rejections(&self) -> u64 {
        self.rejections.load(Ordering::Relaxed)
    }

    pub fn transitions(&self) -> u64 {
        self.transitions.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_count_as_calls() {
        let metrics = BreakerMetrics::new();
        metrics.record_admitted();
        metrics.record_rejection();
        metrics.record_failure();

        assert_eq!(metrics.total_calls(), 2);
        assert_eq!(metrics.rejections(), 1);
        assert_eq!(metrics.failures(), 1);
        assert_eq!(metrics.successes(), 0);
    }
}
