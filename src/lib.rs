//! Fallback Cache - a thread-safe in-memory TTL cache with LRU eviction
//!
//! Built as an in-process fallback for when Redis is unavailable: one key
//! namespace holding scalars, counters, sets, and field maps, with per-entry
//! expiry, a hard capacity bound enforced by LRU eviction, and a background
//! sweep reclaiming expired entries.
//!
//! Construct a [`TtlCache`] explicitly and pass clones of the handle to
//! consumers; call [`TtlCache::shutdown`] at process teardown.

pub mod cache;
pub mod config;
pub mod error;
pub mod tasks;

pub use cache::{CacheStatistics, CacheValue, TtlCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
pub use tasks::spawn_sweep_task;
