//! Cache Module
//!
//! In-memory key-value storage with TTL expiry and LRU eviction, plus the
//! counter, set, and hash operations layered over one key namespace.

mod entry;
mod handle;
mod stats;
mod store;
mod value;


// Re-export public types
pub use entry::CacheEntry;
pub use handle::TtlCache;
pub use stats::CacheStatistics;
pub use store::CacheStore;
pub use value::CacheValue;
