//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::cache::CacheValue;

// == Cache Entry ==
/// A single cache entry: value plus expiry and access metadata.
///
/// Timestamps are monotonic [`Instant`]s. `last_accessed` is refreshed on
/// every successful read and is used only as the LRU eviction key; its
/// nanosecond resolution makes access-order ties practically impossible.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: CacheValue<V>,
    /// Instant after which the entry is logically absent
    pub expires_at: Instant,
    /// Instant of the most recent successful read or write
    pub last_accessed: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl` from now.
    pub fn new(value: CacheValue<V>, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            expires_at: now + ttl,
            last_accessed: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired when the current time is
    /// greater than or equal to its expiry instant, so a fully elapsed TTL
    /// makes the entry immediately absent.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    // == Touch ==
    /// Marks the entry as just accessed.
    pub fn touch(&mut self) {
        self.last_accessed = Instant::now();
    }

    // == Time To Live ==
    /// Remaining time before expiry; zero once expired.
    pub fn ttl_remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}
