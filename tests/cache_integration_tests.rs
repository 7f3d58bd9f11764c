//! Integration tests for the fallback cache
//!
//! Exercises the public `TtlCache` handle end to end: concurrent access,
//! background sweep reclamation, capacity enforcement, and shutdown.

use std::collections::HashSet;
use std::time::Duration;

use fallback_cache::{CacheConfig, CacheValue, TtlCache};

/// Initializes test logging; safe to call from every test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fallback_cache=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn config(default_ttl: Duration, sweep_interval: Duration, max_entries: usize) -> CacheConfig {
    CacheConfig::new(default_ttl, sweep_interval, max_entries)
}

#[tokio::test]
async fn test_sweep_reclaims_without_reads() {
    init_tracing();
    let cache: TtlCache<String> = TtlCache::new(config(
        Duration::from_millis(40),
        Duration::from_millis(60),
        100,
    ));

    for i in 0..20 {
        cache.put(format!("key{i}"), format!("value{i}")).await;
    }
    assert_eq!(cache.len().await, 20);

    // Wait past both the TTL and one sweep interval; no get/remove happens.
    tokio::time::sleep(Duration::from_millis(200)).await;

    let stats = cache.statistics().await;
    assert_eq!(stats.total_entries, 0, "sweep should reclaim every entry");

    cache.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_increments_are_not_lost() {
    init_tracing();
    let cache: TtlCache<String> = TtlCache::new(config(
        Duration::from_secs(300),
        Duration::from_secs(60),
        100,
    ));

    let writers = 8;
    let per_writer = 50;

    let mut handles = Vec::new();
    for _ in 0..writers {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..per_writer {
                cache.increment("counter", 1).await;
            }
        }));
    }
    for handle in handles {
        handle.await.expect("writer task panicked");
    }

    assert_eq!(
        cache.get("counter").await,
        Some(CacheValue::Counter((writers * per_writer) as i64))
    );

    cache.shutdown().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_mixed_ops_respect_capacity() {
    init_tracing();
    let max_entries = 50;
    let cache: TtlCache<String> = TtlCache::new(config(
        Duration::from_secs(300),
        Duration::from_secs(60),
        max_entries,
    ));

    let mut handles = Vec::new();
    for worker in 0..4 {
        let cache = cache.clone();
        handles.push(tokio::spawn(async move {
            for i in 0..100 {
                let key = format!("w{worker}-k{i}");
                cache.put(key.clone(), format!("value{i}")).await;
                let _ = cache.get(&key).await;
                cache.add_to_set("shared-set", key).await;
            }
        }));
    }
    for handle in handles {
        handle.await.expect("worker task panicked");
    }

    assert!(cache.len().await <= max_entries);

    cache.shutdown().await;
}

#[tokio::test]
async fn test_lru_eviction_through_handle() {
    let cache: TtlCache<String> = TtlCache::new(config(
        Duration::from_secs(300),
        Duration::from_secs(60),
        3,
    ));

    cache.put("key1", "value1".to_string()).await;
    cache.put("key2", "value2".to_string()).await;
    cache.put("key3", "value3".to_string()).await;

    // Touch key1 so key2 becomes the eviction candidate.
    cache.get("key1").await;
    cache.put("key4", "value4".to_string()).await;

    assert!(cache.contains_key("key1").await);
    assert!(!cache.contains_key("key2").await);
    assert!(cache.contains_key("key3").await);
    assert!(cache.contains_key("key4").await);
    assert_eq!(cache.statistics().await.evictions, 1);

    cache.shutdown().await;
}

#[tokio::test]
async fn test_expired_entry_is_miss_before_sweep() {
    let cache: TtlCache<String> = TtlCache::new(config(
        Duration::from_secs(300),
        // Sweep far in the future; only lazy expiry can apply.
        Duration::from_secs(3600),
        100,
    ));

    cache
        .put_with_ttl("key1", "value1".to_string(), Duration::from_millis(30))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(60)).await;

    assert!(!cache.contains_key("key1").await);
    assert_eq!(cache.get("key1").await, None);

    cache.shutdown().await;
}

#[tokio::test]
async fn test_collection_copies_are_isolated() {
    let cache: TtlCache<String> = TtlCache::new(config(
        Duration::from_secs(300),
        Duration::from_secs(60),
        100,
    ));

    cache.add_to_set("tags", "a".to_string()).await;
    cache.put_hash("user", "name", "alice".to_string()).await;

    let mut members = cache.get_set_members("tags").await;
    members.insert("b".to_string());
    let mut hash = cache.get_hash("user").await;
    hash.insert("name".to_string(), "mallory".to_string());

    assert_eq!(
        cache.get_set_members("tags").await,
        HashSet::from(["a".to_string()])
    );
    assert_eq!(
        cache.get_hash_field("user", "name").await,
        Some("alice".to_string())
    );

    cache.shutdown().await;
}

#[tokio::test]
async fn test_shutdown_stops_sweep_and_clears() {
    init_tracing();
    let cache: TtlCache<String> = TtlCache::new(config(
        Duration::from_millis(30),
        Duration::from_millis(40),
        100,
    ));

    cache.put("key1", "value1".to_string()).await;
    cache.shutdown().await;

    assert!(cache.is_empty().await);

    // The instance stays usable for direct operations after shutdown; only
    // the background sweep is gone.
    cache.put("key2", "value2".to_string()).await;
    tokio::time::sleep(Duration::from_millis(120)).await;

    // key2 expired (30ms default TTL) but no sweep reclaims it.
    let stats = cache.statistics().await;
    assert_eq!(stats.total_entries, 1);
    assert_eq!(stats.expired_entries, 1);

    cache.shutdown().await;
}

#[tokio::test]
async fn test_zero_ttl_is_rejected() {
    let cache: TtlCache<String> = TtlCache::new(config(
        Duration::from_secs(300),
        Duration::from_secs(60),
        100,
    ));

    let result = cache
        .put_with_ttl("key1", "value1".to_string(), Duration::ZERO)
        .await;

    assert!(result.is_err());
    assert!(cache.is_empty().await);

    cache.shutdown().await;
}
