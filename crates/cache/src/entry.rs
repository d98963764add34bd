//! Cache entries as stored in the engine's index

use std::time::{Duration, SystemTime};

/// A stored value plus its bookkeeping timestamps
///
/// Entries never leave the engine; lookups hand out clones of `value`.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry<V> {
    pub value: V,
    pub inserted_at: SystemTime,
    pub expires_at: Option<SystemTime>,
    pub last_accessed_at: SystemTime,
}

impl<V> CacheEntry<V> {
    pub fn new(value: V, now: SystemTime, ttl: Option<Duration>) -> Self {
        Self {
            value,
            inserted_at: now,
            // A TTL too large to represent means the entry never expires
            expires_at: ttl.and_then(|ttl| now.checked_add(ttl)),
            last_accessed_at: now,
        }
    }

    pub fn is_expired(&self, now: SystemTime) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    pub fn touch(&mut self, now: SystemTime) {
        self.last_accessed_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let now = SystemTime::now();
        let entry = CacheEntry::new("v", now, Some(Duration::from_millis(100)));

        assert!(!entry.is_expired(now + Duration::from_millis(99)));
        assert!(entry.is_expired(now + Duration::from_millis(100)));
    }

    #[test]
    fn test_no_ttl_never_expires() {
        let now = SystemTime::now();
        let entry = CacheEntry::new(1u8, now, None);
        assert!(!entry.is_expired(now + Duration::from_secs(365 * 24 * 3600)));
    }

    #[test]
    fn test_huge_ttl_does_not_overflow() {
        let now = SystemTime::now();
        let entry = CacheEntry::new(1u8, now, Some(Duration::MAX));
        assert_eq!(entry.expires_at, None);
    }

    #[test]
    fn test_touch_updates_access_time_only() {
        let now = SystemTime::now();
        let mut entry = CacheEntry::new(1u8, now, None);
        let later = now + Duration::from_secs(1);
        entry.touch(later);
        assert_eq!(entry.last_accessed_at, later);
        assert_eq!(entry.inserted_at, now);
    }
}
