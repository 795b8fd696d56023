use crate::{Item, LevelKey, RowLocation, SelectionEvent, ViewportWindow};

/// The virtualized list/tree component the cache feeds.
///
/// Only `window`, `set_size` and `revalidate` are required. Everything else defaults to a no-op
/// so a plain (non-tree) list can ignore the tree and rendering hooks.
pub trait Viewport<K, T> {
    /// Current window in flattened row indexes, read on every fetch decision.
    fn window(&self) -> ViewportWindow;

    /// Maps a flattened row index to its level and level-local index.
    ///
    /// The default treats every row as a root row.
    fn locate(&self, index: usize) -> Option<RowLocation<K>> {
        Some(RowLocation {
            level: LevelKey::Root,
            local_index: index,
        })
    }

    /// A disabled viewport ignores user-originated selection.
    fn is_disabled(&self) -> bool {
        false
    }

    fn set_size(&mut self, size: usize);

    /// Re-reads row models after the cache changed underneath already rendered rows.
    fn revalidate(&mut self);

    /// Overwrites already rendered rows of `level`, starting at level-local index `start`.
    ///
    /// Rows the viewport never rendered must be left alone.
    fn replace_rendered(&mut self, level: &LevelKey<K>, start: usize, items: &[Item<K, T>]) {
        let _ = (level, start, items);
    }

    /// Forgets rendered rows `[start, start + len)` of `level`.
    fn clear_rendered(&mut self, level: &LevelKey<K>, start: usize, len: usize) {
        let _ = (level, start, len);
    }

    /// Forgets every rendered row of `level`; called when a child level is dropped.
    fn forget_level(&mut self, level: &LevelKey<K>) {
        let _ = level;
    }

    /// Forgets every rendered row.
    fn reset_rendered(&mut self) {}

    fn expand(&mut self, key: &K) {
        let _ = key;
    }

    fn collapse(&mut self, key: &K) {
        let _ = key;
    }

    fn clear_expanded(&mut self) {}

    fn set_selected_items(&mut self, items: &[&Item<K, T>]) {
        let _ = items;
    }

    fn set_details_opened_items(&mut self, keys: &[K]) {
        let _ = keys;
    }

    fn set_identity_path(&mut self, path: Option<&str>) {
        let _ = path;
    }

    /// Local notification for server-originated selection changes.
    fn selection_event(&mut self, event: SelectionEvent<K>) {
        let _ = event;
    }
}
