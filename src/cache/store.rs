//! Cache Store Module
//!
//! Single-threaded cache core: HashMap storage with TTL expiry, LRU capacity
//! eviction, and the set/hash/counter operations layered over one key
//! namespace. Thread safety is provided by the [`crate::TtlCache`] handle,
//! which holds this store behind one lock.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::time::Duration;

use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStatistics, CacheValue};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Main cache storage with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Hit/miss/eviction counters
    stats: CacheStatistics,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL applied when no explicit TTL is given
    default_ttl: Duration,
}

impl<V> CacheStore<V>
where
    V: Clone + Eq + Hash,
{
    // == Constructor ==
    /// Creates a new store with the given capacity and default TTL.
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStatistics::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Put ==
    /// Stores a scalar value with the default TTL, overwriting any existing
    /// entry for the key.
    pub fn put(&mut self, key: String, value: V) {
        self.insert_entry(key, CacheValue::Scalar(value), self.default_ttl);
    }

    /// Stores a scalar value with an explicit TTL.
    ///
    /// A zero TTL is rejected: accepting it would insert an entry that is
    /// already absent on every read path.
    pub fn put_with_ttl(&mut self, key: String, value: V, ttl: Duration) -> Result<()> {
        if ttl.is_zero() {
            return Err(CacheError::InvalidTtl { key });
        }
        self.insert_entry(key, CacheValue::Scalar(value), ttl);
        Ok(())
    }

    // == Get ==
    /// Retrieves the value for a key.
    ///
    /// An absent or expired key is a miss, not an error; an expired entry is
    /// deleted on the spot rather than waiting for the sweep. A hit refreshes
    /// `last_accessed` and returns a clone of the stored value.
    pub fn get(&mut self, key: &str) -> Option<CacheValue<V>> {
        match self.live_entry(key) {
            Some(entry) => {
                entry.touch();
                let value = entry.value.clone();
                self.stats.record_hit();
                debug!(key, "cache hit");
                Some(value)
            }
            None => {
                self.stats.record_miss();
                debug!(key, "cache miss");
                None
            }
        }
    }

    // == Remove ==
    /// Deletes an entry unconditionally; no-op if the key is absent.
    pub fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            debug!(key, "removed cache entry");
        }
    }

    // == Contains Key ==
    /// True iff the key is present and not expired. Does not touch the entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    // == Clear ==
    /// Deletes all entries; the store stays usable.
    pub fn clear(&mut self) {
        self.entries.clear();
        debug!("cleared all cache entries");
    }

    // == Increment ==
    /// Adds `delta` to the counter stored under `key` and returns the new
    /// value.
    ///
    /// An absent or expired key starts from zero. A key holding a
    /// non-counter value is reset to `delta` with a logged warning. The TTL
    /// is reset to the default either way.
    pub fn increment(&mut self, key: &str, delta: i64) -> i64 {
        let new_value = match self.live_entry(key) {
            Some(entry) => match &entry.value {
                CacheValue::Counter(current) => current + delta,
                other => {
                    warn!(
                        key,
                        kind = other.kind(),
                        "cannot increment non-numeric value, resetting to delta"
                    );
                    delta
                }
            },
            None => delta,
        };

        self.insert_entry(key.to_string(), CacheValue::Counter(new_value), self.default_ttl);
        new_value
    }

    // == Set Operations ==
    /// Adds a member to the set stored under `key`.
    ///
    /// An absent, expired, or wrong-shaped entry is replaced by a fresh set;
    /// the TTL is reset to the default.
    pub fn add_to_set(&mut self, key: &str, member: V) {
        let mut set = match self.live_entry(key) {
            Some(entry) => match &mut entry.value {
                CacheValue::Set(set) => std::mem::take(set),
                other => {
                    warn!(key, kind = other.kind(), "replacing non-set value with a set");
                    HashSet::new()
                }
            },
            None => HashSet::new(),
        };

        set.insert(member);
        self.insert_entry(key.to_string(), CacheValue::Set(set), self.default_ttl);
    }

    /// Removes a member from the set under `key`. Returns whether a removal
    /// happened; a missing, expired, or non-set entry is a no-op.
    pub fn remove_from_set(&mut self, key: &str, member: &V) -> bool {
        match self.live_entry(key) {
            Some(entry) => match &mut entry.value {
                CacheValue::Set(set) => {
                    let removed = set.remove(member);
                    if removed {
                        entry.touch();
                    }
                    removed
                }
                _ => false,
            },
            None => false,
        }
    }

    /// Returns a copy of the set under `key`, or an empty set if the key is
    /// absent, expired, or not set-shaped. Never exposes the live container.
    pub fn get_set_members(&mut self, key: &str) -> HashSet<V> {
        match self.live_entry(key) {
            Some(entry) => match &entry.value {
                CacheValue::Set(set) => {
                    let members = set.clone();
                    entry.touch();
                    members
                }
                _ => HashSet::new(),
            },
            None => HashSet::new(),
        }
    }

    // == Hash Operations ==
    /// Stores a field in the hash under `key`, with the same absent/expired/
    /// wrong-shape reset rule as sets; the TTL is reset to the default.
    pub fn put_hash(&mut self, key: &str, field: String, value: V) {
        let mut hash = match self.live_entry(key) {
            Some(entry) => match &mut entry.value {
                CacheValue::Hash(hash) => std::mem::take(hash),
                other => {
                    warn!(key, kind = other.kind(), "replacing non-hash value with a hash");
                    HashMap::new()
                }
            },
            None => HashMap::new(),
        };

        hash.insert(field, value);
        self.insert_entry(key.to_string(), CacheValue::Hash(hash), self.default_ttl);
    }

    /// Returns the value of one hash field, or None if the key, field, or
    /// hash shape is absent.
    pub fn get_hash_field(&mut self, key: &str, field: &str) -> Option<V> {
        match self.live_entry(key) {
            Some(entry) => match &entry.value {
                CacheValue::Hash(hash) => {
                    let value = hash.get(field).cloned();
                    entry.touch();
                    value
                }
                _ => None,
            },
            None => None,
        }
    }

    /// Returns a copy of the whole field map under `key`, or an empty map.
    /// Never exposes the live container.
    pub fn get_hash(&mut self, key: &str) -> HashMap<String, V> {
        match self.live_entry(key) {
            Some(entry) => match &entry.value {
                CacheValue::Hash(hash) => {
                    let fields = hash.clone();
                    entry.touch();
                    fields
                }
                _ => HashMap::new(),
            },
            None => HashMap::new(),
        }
    }

    // == Statistics ==
    /// Snapshot of occupancy and counters, consistent for a single lock hold.
    pub fn statistics(&self) -> CacheStatistics {
        let expired = self
            .entries
            .values()
            .filter(|entry| entry.is_expired())
            .count();

        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats.expired_entries = expired;
        stats.active_entries = self.entries.len() - expired;
        stats
    }

    // == Sweep ==
    /// Removes every expired entry regardless of access pattern.
    ///
    /// Returns the number of entries removed. Called periodically by the
    /// background sweep task to bound growth from keys that are never read
    /// again after expiring.
    pub fn sweep_expired(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        before - self.entries.len()
    }

    // == Length ==
    /// Current number of physically present entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Internal ==
    /// Looks up a live entry, deleting it on the spot if it has expired.
    fn live_entry(&mut self, key: &str) -> Option<&mut CacheEntry<V>> {
        let expired = matches!(self.entries.get(key), Some(entry) if entry.is_expired());
        if expired {
            self.entries.remove(key);
            debug!(key, "removed expired entry on read");
            return None;
        }
        self.entries.get_mut(key)
    }

    /// Inserts an entry, evicting one LRU entry first when a brand-new key
    /// would push the store past capacity. Every entry-creating operation
    /// funnels through here so the capacity bound holds for counters, sets,
    /// and hashes as well as plain puts.
    fn insert_entry(&mut self, key: String, value: CacheValue<V>, ttl: Duration) {
        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite && self.entries.len() >= self.max_entries {
            self.evict_lru();
        }
        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    /// Deletes the entry with the oldest `last_accessed`. Ties break by
    /// iteration order.
    fn evict_lru(&mut self) {
        let oldest_key = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_accessed)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest_key {
            self.entries.remove(&key);
            self.stats.record_eviction();
            debug!(key = %key, "evicted LRU cache entry");
        }
    }
}
