//! Configuration Module
//!
//! Construction-time parameters for the cache.
//!
//! There is no environment coupling here: the cache is an in-process
//! library, so consumers pass explicit values (or take the defaults) when
//! they build a [`crate::TtlCache`]. Explicit parameters also keep tests
//! deterministic.

use std::time::Duration;

// == Default Constants ==
/// Default TTL applied when a put does not carry an explicit TTL.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Default period between background sweep passes.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Default hard cap on the number of live entries.
pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

/// Cache construction parameters.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied when no explicit TTL is given
    pub default_ttl: Duration,
    /// Period between background sweep passes
    pub sweep_interval: Duration,
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
}

impl CacheConfig {
    /// Creates a config with explicit parameters.
    pub fn new(default_ttl: Duration, sweep_interval: Duration, max_entries: usize) -> Self {
        Self {
            default_ttl,
            sweep_interval,
            max_entries,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}
