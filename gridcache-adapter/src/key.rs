#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

/// Map keyed by `(level, local index)` of a rendered row.
///
/// Hashed with `std`, ordered without it, matching what `gridcache::CacheKey` guarantees.
#[cfg(feature = "std")]
pub(crate) type RowMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type RowMap<K, V> = BTreeMap<K, V>;
