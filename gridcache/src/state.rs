/// A lightweight, serializable snapshot of what the cache currently holds.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheStats {
    /// Known levels, the root included.
    pub levels: usize,
    pub cached_pages: usize,
    pub cached_items: usize,
    pub pending_callbacks: usize,
    pub selected: usize,
    pub expanded: usize,
}
