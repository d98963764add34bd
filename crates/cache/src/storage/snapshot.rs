//! Snapshot payload encoding

use super::format;
use crate::entry::CacheEntry;
use lru::LruCache;
use rampart_core::{codes, Error, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// One persisted entry
///
/// Values are stored as JSON so the payload stays readable by any `V`
/// with serde support; the surrounding list is bincode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub key: String,
    pub value: Vec<u8>,
    pub expires_at_ms: Option<i64>,
}

/// A record decoded back into a live value
pub(crate) struct Restored<V> {
    pub key: String,
    pub value: V,
    pub expires_at: Option<SystemTime>,
}

/// Encode the live entries of `store` in LRU to MRU order
pub(crate) fn encode_entries<V: Serialize>(
    store: &LruCache<String, CacheEntry<V>>,
    now: SystemTime,
) -> Result<Vec<u8>> {
    let mut records = Vec::with_capacity(store.len());
    // `iter` walks MRU first
    for (key, entry) in store.iter().rev() {
        if entry.is_expired(now) {
            continue;
        }
        let value = serde_json::to_vec(&entry.value)
            .map_err(|e| Error::from(e).with_context("key", key))?;
        records.push(SnapshotRecord {
            key: key.clone(),
            value,
            expires_at_ms: entry.expires_at.map(to_epoch_ms),
        });
    }

    let payload = bincode::serialize(&records).map_err(|e| {
        Error::cache(
            codes::SERIALIZATION_FAILED,
            format!("failed to encode snapshot: {e}"),
        )
    })?;
    Ok(format::frame(&payload))
}

/// Decode a snapshot, dropping records that expired while it sat on disk
pub(crate) fn decode_entries<V: DeserializeOwned>(
    bytes: &[u8],
    now: SystemTime,
) -> Result<Vec<Restored<V>>> {
    let payload = format::unframe(bytes)?;
    let records: Vec<SnapshotRecord> = bincode::deserialize(payload).map_err(|e| {
        Error::cache(
            codes::CACHE_LOAD_FAILED,
            format!("failed to decode snapshot records: {e}"),
        )
    })?;

    let mut restored = Vec::with_capacity(records.len());
    for record in records {
        let expires_at = record.expires_at_ms.map(from_epoch_ms);
        if expires_at.is_some_and(|at| now >= at) {
            continue;
        }
        let value = serde_json::from_slice(&record.value).map_err(|e| {
            Error::cache(
                codes::CACHE_LOAD_FAILED,
                format!("failed to decode value for key '{}'", record.key),
            )
            .with_context("key", &record.key)
            .with_cause(e.into())
        })?;
        restored.push(Restored {
            key: record.key,
            value,
            expires_at,
        });
    }
    Ok(restored)
}

fn to_epoch_ms(at: SystemTime) -> i64 {
    match at.duration_since(UNIX_EPOCH) {
        Ok(since) => i64::try_from(since.as_millis()).unwrap_or(i64::MAX),
        Err(_) => 0,
    }
}

fn from_epoch_ms(ms: i64) -> SystemTime {
    UNIX_EPOCH + Duration::from_millis(u64::try_from(ms).unwrap_or(0))
}
