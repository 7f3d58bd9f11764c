//! Cache Handle Module
//!
//! The public, thread-safe face of the cache: a clone-able handle holding
//! the [`CacheStore`] behind one `tokio::sync::RwLock` and owning the
//! background sweep task.
//!
//! One primitive guards every table access. Operations that mutate state,
//! including the `last_accessed` touch on the read path and the lazy
//! deletion of expired entries, take the write lock; `contains_key` and
//! `statistics` are pure reads under the read lock. There is no
//! read-to-write lock upgrading anywhere, so the upgrade hazard cannot
//! occur.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::info;

use crate::cache::{CacheStatistics, CacheStore, CacheValue};
use crate::config::CacheConfig;
use crate::error::Result;
use crate::tasks::spawn_sweep_task;

// == TTL Cache ==
/// Thread-safe in-memory TTL cache with LRU eviction.
///
/// Cloning the handle is cheap and every clone addresses the same table.
/// The instance is meant to live for the whole process; call [`shutdown`]
/// at process teardown to stop the sweep task and release the table.
///
/// [`shutdown`]: TtlCache::shutdown
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Shared entry table
    store: Arc<RwLock<CacheStore<V>>>,
    /// Sweep task handle, taken on shutdown
    sweeper: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl<V> Clone for TtlCache<V> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            sweeper: Arc::clone(&self.sweeper),
        }
    }
}

impl<V> TtlCache<V>
where
    V: Clone + Eq + Hash + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates the cache and spawns its background sweep task.
    ///
    /// Must be called within a tokio runtime.
    pub fn new(config: CacheConfig) -> Self {
        let store = Arc::new(RwLock::new(CacheStore::new(
            config.max_entries,
            config.default_ttl,
        )));
        let sweeper = spawn_sweep_task(Arc::clone(&store), config.sweep_interval);

        info!(
            max_entries = config.max_entries,
            default_ttl_secs = config.default_ttl.as_secs(),
            sweep_interval_secs = config.sweep_interval.as_secs(),
            "initialized in-memory cache fallback"
        );

        Self {
            store,
            sweeper: Arc::new(Mutex::new(Some(sweeper))),
        }
    }

    // == Scalar Operations ==
    /// Stores a value with the default TTL, overwriting any existing entry.
    pub async fn put(&self, key: impl Into<String>, value: V) {
        self.store.write().await.put(key.into(), value);
    }

    /// Stores a value with an explicit TTL. Rejects a zero TTL.
    pub async fn put_with_ttl(
        &self,
        key: impl Into<String>,
        value: V,
        ttl: Duration,
    ) -> Result<()> {
        self.store.write().await.put_with_ttl(key.into(), value, ttl)
    }

    /// Retrieves the value for a key; absent or expired keys are misses.
    pub async fn get(&self, key: &str) -> Option<CacheValue<V>> {
        self.store.write().await.get(key)
    }

    /// Deletes an entry unconditionally; no-op if absent.
    pub async fn remove(&self, key: &str) {
        self.store.write().await.remove(key);
    }

    /// True iff the key is present and not expired.
    pub async fn contains_key(&self, key: &str) -> bool {
        self.store.read().await.contains_key(key)
    }

    /// Deletes all entries; the cache stays usable.
    pub async fn clear(&self) {
        self.store.write().await.clear();
    }

    // == Counter Operations ==
    /// Adds `delta` to the counter under `key` and returns the new value.
    /// See [`CacheStore::increment`] for the reset rules.
    pub async fn increment(&self, key: &str, delta: i64) -> i64 {
        self.store.write().await.increment(key, delta)
    }

    // == Set Operations ==
    /// Adds a member to the set under `key`.
    pub async fn add_to_set(&self, key: &str, member: V) {
        self.store.write().await.add_to_set(key, member);
    }

    /// Removes a member from the set under `key`; returns whether a removal
    /// happened.
    pub async fn remove_from_set(&self, key: &str, member: &V) -> bool {
        self.store.write().await.remove_from_set(key, member)
    }

    /// Returns a defensive copy of the set under `key`.
    pub async fn get_set_members(&self, key: &str) -> HashSet<V> {
        self.store.write().await.get_set_members(key)
    }

    // == Hash Operations ==
    /// Stores a field in the hash under `key`.
    pub async fn put_hash(&self, key: &str, field: impl Into<String>, value: V) {
        self.store.write().await.put_hash(key, field.into(), value);
    }

    /// Returns one hash field, or None if key, field, or shape is absent.
    pub async fn get_hash_field(&self, key: &str, field: &str) -> Option<V> {
        self.store.write().await.get_hash_field(key, field)
    }

    /// Returns a defensive copy of the whole field map under `key`.
    pub async fn get_hash(&self, key: &str) -> HashMap<String, V> {
        self.store.write().await.get_hash(key)
    }

    // == Statistics ==
    /// Snapshot of occupancy and counters under one read lock hold.
    pub async fn statistics(&self) -> CacheStatistics {
        self.store.read().await.statistics()
    }

    /// Number of physically present entries, including expired ones awaiting
    /// the sweep.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    /// True if the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    // == Shutdown ==
    /// Stops the background sweep and clears the table. Idempotent.
    pub async fn shutdown(&self) {
        if let Some(sweeper) = self.sweeper.lock().await.take() {
            sweeper.abort();
        }
        self.store.write().await.clear();
        info!("cache shutdown complete");
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> CacheConfig {
        CacheConfig::new(Duration::from_secs(300), Duration::from_secs(60), 100)
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let cache: TtlCache<String> = TtlCache::new(test_config());

        cache.put("key1", "value1".to_string()).await;

        assert_eq!(
            cache.get("key1").await,
            Some(CacheValue::Scalar("value1".to_string()))
        );
        assert_eq!(cache.get("absent").await, None);

        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_contains_key_agrees_with_get() {
        let cache: TtlCache<String> = TtlCache::new(test_config());

        cache.put("key1", "value1".to_string()).await;

        assert_eq!(cache.contains_key("key1").await, cache.get("key1").await.is_some());
        assert_eq!(
            cache.contains_key("absent").await,
            cache.get("absent").await.is_some()
        );

        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let cache: TtlCache<String> = TtlCache::new(test_config());
        let other = cache.clone();

        cache.put("key1", "value1".to_string()).await;

        assert!(other.contains_key("key1").await);

        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_shutdown_is_idempotent() {
        let cache: TtlCache<String> = TtlCache::new(test_config());

        cache.put("key1", "value1".to_string()).await;

        cache.shutdown().await;
        assert!(cache.is_empty().await);

        // Second shutdown is a no-op.
        cache.shutdown().await;
    }

    #[tokio::test]
    async fn test_shape_operations_through_handle() {
        let cache: TtlCache<String> = TtlCache::new(test_config());

        cache.add_to_set("tags", "a".to_string()).await;
        cache.put_hash("user", "name", "alice".to_string()).await;

        assert_eq!(
            cache.get_set_members("tags").await,
            HashSet::from(["a".to_string()])
        );
        assert_eq!(
            cache.get_hash_field("user", "name").await,
            Some("alice".to_string())
        );
        assert_eq!(cache.increment("counter", 2).await, 2);

        cache.shutdown().await;
    }
}
