//! Cache Value Module
//!
//! Tagged union over the value shapes a single key can hold.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

// == Cache Value ==
/// The value stored under one cache key.
///
/// A single key namespace holds scalars, counters, sets, and field maps
/// interchangeably. Shape-aware operations match on the variant; a mismatch
/// (e.g. an `add_to_set` on a key holding a hash) resets the entry to the
/// expected shape with a logged warning rather than failing the caller.
#[derive(Debug, Clone)]
pub enum CacheValue<V> {
    /// Opaque payload stored by `put`
    Scalar(V),
    /// Numeric counter maintained by `increment`
    Counter(i64),
    /// Unordered collection of members
    Set(HashSet<V>),
    /// String-keyed field map
    Hash(HashMap<String, V>),
}

impl<V> CacheValue<V> {
    // == Kind ==
    /// Short name of the variant, used in shape-mismatch warnings.
    pub fn kind(&self) -> &'static str {
        match self {
            CacheValue::Scalar(_) => "scalar",
            CacheValue::Counter(_) => "counter",
            CacheValue::Set(_) => "set",
            CacheValue::Hash(_) => "hash",
        }
    }
}

// Manual impl: the derive would only require `V: PartialEq`, which is not
// enough for the `HashSet` variant.
impl<V: Eq + Hash> PartialEq for CacheValue<V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (CacheValue::Scalar(a), CacheValue::Scalar(b)) => a == b,
            (CacheValue::Counter(a), CacheValue::Counter(b)) => a == b,
            (CacheValue::Set(a), CacheValue::Set(b)) => a == b,
            (CacheValue::Hash(a), CacheValue::Hash(b)) => a == b,
            _ => false,
        }
    }
}

impl<V: Eq + Hash> Eq for CacheValue<V> {}
