//! Basic cache operation tests

use crate::config::CacheConfig;
use crate::core::Cache;
use rampart_core::{codes, Result};
use std::time::Duration;

fn cache_of(max_size: usize) -> Result<Cache<String>> {
    Cache::create_memory(CacheConfig::with_max_size(max_size))
}

#[test]
fn test_basic_operations() -> Result<()> {
    let cache = cache_of(8)?;

    cache.set("key1", "value1".to_string(), None)?;
    assert_eq!(cache.get("key1")?, "value1");

    assert!(cache.has("key1"));
    assert!(!cache.has("key2"));

    assert!(cache.remove("key1"));
    assert!(!cache.has("key1"));
    assert!(!cache.remove("key1"));

    Ok(())
}

#[test]
fn test_miss_is_a_cache_error() -> Result<()> {
    let cache = cache_of(8)?;
    let error = cache.get("absent").unwrap_err();
    assert_eq!(error.code(), codes::CACHE_MISS);
    assert_eq!(error.context_value("key"), Some("absent"));
    Ok(())
}

#[test]
fn test_overwrite_keeps_size() -> Result<()> {
    let cache = cache_of(2)?;
    cache.set("a", "1".into(), None)?;
    cache.set("b", "2".into(), None)?;
    cache.set("a", "3".into(), None)?;

    assert_eq!(cache.size(), 2);
    assert_eq!(cache.get("a")?, "3");
    assert_eq!(cache.get("b")?, "2");
    assert_eq!(cache.stats().evictions, 0);
    Ok(())
}

#[test]
fn test_get_promotes_recency() -> Result<()> {
    let cache = cache_of(2)?;
    cache.set("a", "1".into(), None)?;
    cache.set("b", "2".into(), None)?;

    // "a" becomes most recent, so "b" is the eviction victim
    cache.get("a")?;
    cache.set("c", "3".into(), None)?;

    assert!(cache.has("a"));
    assert!(!cache.has("b"));
    assert!(cache.has("c"));
    Ok(())
}

#[test]
fn test_has_does_not_promote() -> Result<()> {
    let cache = cache_of(2)?;
    cache.set("a", "1".into(), None)?;
    cache.set("b", "2".into(), None)?;

    assert!(cache.has("a"));
    cache.set("c", "3".into(), None)?;

    assert!(!cache.has("a"));
    assert_eq!(cache.keys(), ["b", "c"]);
    Ok(())
}

#[test]
fn test_zero_ttl_is_rejected() -> Result<()> {
    let cache = cache_of(2)?;
    let error = cache
        .set("a", "1".into(), Some(Duration::ZERO))
        .unwrap_err();
    assert_eq!(error.code(), codes::INVALID_TTL);
    assert!(cache.is_empty());
    Ok(())
}

#[test]
fn test_default_ttl_applies() -> Result<()> {
    let config = CacheConfig {
        default_ttl: Some(Duration::from_millis(20)),
        ..CacheConfig::with_max_size(4)
    };
    let cache: Cache<u32> = Cache::create_memory(config)?;
    cache.set("short", 1, None)?;
    cache.set("long", 2, Some(Duration::from_secs(60)))?;

    std::thread::sleep(Duration::from_millis(40));

    assert!(!cache.has("short"));
    assert_eq!(cache.get("long")?, 2);
    Ok(())
}

#[test]
fn test_clear_is_idempotent() -> Result<()> {
    let cache = cache_of(4)?;
    cache.set("a", "1".into(), None)?;
    cache.set("b", "2".into(), None)?;

    cache.clear();
    assert_eq!(cache.size(), 0);
    cache.clear();
    assert_eq!(cache.size(), 0);
    assert!(cache.keys().is_empty());
    Ok(())
}

#[test]
fn test_invalid_configs_fail_creation() {
    let error = Cache::<u8>::create_memory(CacheConfig::with_max_size(0)).unwrap_err();
    assert_eq!(error.code(), codes::CACHE_CREATION_FAILED);

    let config = CacheConfig {
        default_ttl: Some(Duration::ZERO),
        ..CacheConfig::with_max_size(1)
    };
    let error = Cache::<u8>::create_memory(config).unwrap_err();
    assert_eq!(error.code(), codes::INVALID_TTL);
}

#[test]
fn test_clones_share_state() -> Result<()> {
    let cache = cache_of(4)?;
    let other = cache.clone();
    other.set("shared", "yes".into(), None)?;
    assert_eq!(cache.get("shared")?, "yes");
    Ok(())
}

#[test]
fn test_memory_flush_is_noop() -> Result<()> {
    let cache = cache_of(4)?;
    cache.set("a", "1".into(), None)?;
    cache.flush()?;
    assert!(cache.snapshot_path().is_none());
    Ok(())
}
