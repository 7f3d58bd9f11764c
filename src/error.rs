//! Error types for the fallback cache
//!
//! Provides unified error handling using thiserror.
//!
//! The taxonomy is deliberately narrow: a cache miss is an `Option::None`,
//! never an error, and a value-shape mismatch is corrected in place with a
//! logged warning. The only condition surfaced to callers is an invalid
//! explicit TTL.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the fallback cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// An explicit TTL of zero was supplied
    #[error("Invalid TTL for key '{key}': duration must be greater than zero")]
    InvalidTtl {
        /// Key the rejected put was addressed to
        key: String,
    },
}

// == Result Type Alias ==
/// Convenience Result type for the fallback cache.
pub type Result<T> = std::result::Result<T, CacheError>;
