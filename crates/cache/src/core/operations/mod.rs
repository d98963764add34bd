//! Cache operations

mod get;
mod loader;
mod misc;
mod put;
mod remove;

use super::types::Cache;
use std::time::SystemTime;

/// Outcome of a locked lookup
enum Lookup<V> {
    Hit(V),
    Expired,
    Absent,
}

impl<V> Cache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Look up a live entry, promoting it and dropping it if expired
    ///
    /// Statistics are left to the caller.
    fn lookup(&self, key: &str) -> Option<V> {
        let now = SystemTime::now();
        let (lookup, expired) = {
            let mut store = self.inner.store.lock();
            let lookup = match store.get_mut(key) {
                Some(entry) if entry.is_expired(now) => Lookup::Expired,
                Some(entry) => {
                    entry.touch(now);
                    Lookup::Hit(entry.value.clone())
                }
                None => Lookup::Absent,
            };
            let expired = match lookup {
                Lookup::Expired => store.pop(key),
                _ => None,
            };
            (lookup, expired)
        };

        match lookup {
            Lookup::Hit(value) => Some(value),
            Lookup::Expired => {
                drop(expired);
                self.inner.stats.record_expirations(1);
                self.inner.mark_dirty();
                tracing::debug!(key, "dropped expired cache entry");
                None
            }
            Lookup::Absent => None,
        }
    }
}
