//! Cache Statistics Module
//!
//! Snapshot of cache occupancy and performance counters.

use serde::Serialize;

// == Cache Statistics ==
/// Point-in-time view of the cache, taken under one consistent lock hold.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStatistics {
    /// Entries physically present, including expired ones awaiting the sweep
    pub total_entries: usize,
    /// Entries present and not expired
    pub active_entries: usize,
    /// Entries past expiry but not yet reclaimed
    pub expired_entries: usize,
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key absent or expired)
    pub misses: u64,
    /// Number of entries evicted by the LRU capacity policy
    pub evictions: u64,
}

impl CacheStatistics {
    // == Constructor ==
    /// Creates statistics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no reads have happened.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}
