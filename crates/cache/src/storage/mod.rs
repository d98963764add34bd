//! Snapshot persistence for the cache engine

pub mod format;
mod snapshot;

pub use snapshot::SnapshotRecord;
pub(crate) use snapshot::Restored;

use crate::entry::CacheEntry;
use lru::LruCache;
use rampart_core::{codes, Error, Result};
use rampart_utils::atomic_file::{read_if_exists, write_atomic};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

type EncodeFn<V> = fn(&LruCache<String, CacheEntry<V>>, SystemTime) -> Result<Vec<u8>>;

/// Where and how a persistent cache writes its snapshots
///
/// The encoder is captured when the cache is created so that engines over
/// non-serializable values carry no serde bounds.
pub(crate) struct Persistence<V> {
    path: PathBuf,
    encode: EncodeFn<V>,
}

impl<V> Persistence<V> {
    pub fn new(path: PathBuf) -> Self
    where
        V: Serialize,
    {
        Self {
            path,
            encode: snapshot::encode_entries::<V>,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encode(
        &self,
        store: &LruCache<String, CacheEntry<V>>,
        now: SystemTime,
    ) -> Result<Vec<u8>> {
        (self.encode)(store, now).map_err(|e| self.write_failed("failed to encode snapshot", e))
    }

    pub fn write(&self, bytes: &[u8]) -> Result<()> {
        write_atomic(&self.path, bytes)
            .map_err(|e| self.write_failed("failed to write snapshot", e))
    }

    fn write_failed(&self, message: &str, cause: Error) -> Error {
        Error::cache(codes::CACHE_WRITE_FAILED, message)
            .with_context("path", self.path.display())
            .with_cause(cause)
    }
}

/// Read the snapshot at `path`; a missing file is an empty snapshot
pub(crate) fn load<V: DeserializeOwned>(
    path: &Path,
    now: SystemTime,
) -> Result<Vec<Restored<V>>> {
    let load_failed = |cause: Error| {
        Error::cache(codes::CACHE_LOAD_FAILED, "failed to load cache snapshot")
            .with_context("path", path.display())
            .with_cause(cause)
    };

    let Some(bytes) = read_if_exists(path).map_err(load_failed)? else {
        return Ok(Vec::new());
    };
    snapshot::decode_entries(&bytes, now).map_err(load_failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.snap");
        let restored: Vec<Restored<u32>> = load(&path, SystemTime::now()).unwrap();
        assert!(restored.is_empty());
    }

    #[test]
    fn test_write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.snap");
        let now = SystemTime::now();

        let mut store = LruCache::unbounded();
        store.put("a".to_string(), CacheEntry::new(1u32, now, None));
        store.put(
            "b".to_string(),
            CacheEntry::new(2u32, now, Some(Duration::from_secs(60))),
        );

        let persistence = Persistence::new(path.clone());
        let bytes = persistence.encode(&store, now).unwrap();
        persistence.write(&bytes).unwrap();

        let restored: Vec<Restored<u32>> = load(&path, now).unwrap();
        let pairs: Vec<_> = restored.iter().map(|r| (r.key.as_str(), r.value)).collect();
        assert_eq!(pairs, [("a", 1), ("b", 2)]);
    }

    #[test]
    fn test_corrupt_file_reports_path_and_cause() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cache.snap");
        std::fs::write(&path, b"definitely not a snapshot").unwrap();

        let error = load::<u32>(&path, SystemTime::now()).err().unwrap();
        assert_eq!(error.code(), codes::CACHE_LOAD_FAILED);
        assert!(error.context_value("path").is_some());
        assert!(error.cause().is_some());
    }

    #[test]
    fn test_write_under_a_file_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"a file, not a directory").unwrap();
        let persistence: Persistence<u32> = Persistence::new(blocker.join("cache.snap"));

        let error = persistence.write(b"bytes").unwrap_err();
        assert_eq!(error.code(), codes::CACHE_WRITE_FAILED);
    }
}
