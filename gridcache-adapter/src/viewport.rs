use alloc::string::String;
use alloc::vec::Vec;

use gridcache::{CacheKey, Item, LevelKey, RowLocation, SelectionEvent, Viewport, ViewportWindow};

use crate::key::RowMap;

/// An in-memory [`Viewport`] for hosts that render somewhere the cache can't see.
///
/// Rows count as rendered once the host passes them to [`HeadlessViewport::render`]; from then on
/// the cache keeps them current. The flattened tree layout comes from
/// [`HeadlessViewport::set_layout`]; without one every row is a root row.
#[derive(Clone, Debug)]
pub struct HeadlessViewport<K, T> {
    window: ViewportWindow,
    layout: Option<Vec<RowLocation<K>>>,
    disabled: bool,
    size: usize,
    revalidations: u64,
    rendered: RowMap<(LevelKey<K>, usize), Item<K, T>>,
    expanded: Vec<K>,
    selected: Vec<K>,
    details_opened: Vec<K>,
    identity_path: Option<String>,
    events: Vec<SelectionEvent<K>>,
}

impl<K: CacheKey, T: Clone> Default for HeadlessViewport<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: CacheKey, T: Clone> HeadlessViewport<K, T> {
    pub fn new() -> Self {
        Self {
            window: ViewportWindow::default(),
            layout: None,
            disabled: false,
            size: 0,
            revalidations: 0,
            rendered: RowMap::new(),
            expanded: Vec::new(),
            selected: Vec::new(),
            details_opened: Vec::new(),
            identity_path: None,
            events: Vec::new(),
        }
    }

    /// Number of flattened rows: the layout length, or the root size without a layout.
    pub fn row_count(&self) -> usize {
        self.layout.as_ref().map_or(self.size, Vec::len)
    }

    /// Moves the window to flattened rows `[start, end)`.
    pub fn scroll_to(&mut self, start: usize, end: usize) {
        let count = self.row_count();
        self.window = ViewportWindow::new(start.min(count), end.min(count), 0, count);
    }

    pub fn set_window(&mut self, window: ViewportWindow) {
        self.window = window;
    }

    /// Replaces the flattened layout; `None` goes back to a flat root list.
    pub fn set_layout(&mut self, layout: Option<Vec<RowLocation<K>>>) {
        self.layout = layout;
        self.window.virtual_count = self.row_count();
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// How many times the cache asked for a re-read of rendered rows.
    pub fn revalidations(&self) -> u64 {
        self.revalidations
    }

    /// Marks rows of `level` starting at `start` as rendered with the given content.
    pub fn render(&mut self, level: LevelKey<K>, start: usize, items: &[Item<K, T>]) {
        for (i, item) in items.iter().enumerate() {
            self.rendered.insert((level.clone(), start + i), item.clone());
        }
    }

    pub fn rendered(&self, level: &LevelKey<K>, index: usize) -> Option<&Item<K, T>> {
        self.rendered.get(&(level.clone(), index))
    }

    pub fn rendered_len(&self) -> usize {
        self.rendered.len()
    }

    pub fn expanded_keys(&self) -> &[K] {
        &self.expanded
    }

    pub fn selected_keys(&self) -> &[K] {
        &self.selected
    }

    pub fn details_opened_keys(&self) -> &[K] {
        &self.details_opened
    }

    pub fn identity_path(&self) -> Option<&str> {
        self.identity_path.as_deref()
    }

    /// Takes the server-originated selection events fired since the last call.
    pub fn take_events(&mut self) -> Vec<SelectionEvent<K>> {
        core::mem::take(&mut self.events)
    }
}

impl<K: CacheKey, T: Clone> Viewport<K, T> for HeadlessViewport<K, T> {
    fn window(&self) -> ViewportWindow {
        self.window
    }

    fn locate(&self, index: usize) -> Option<RowLocation<K>> {
        match &self.layout {
            Some(rows) => rows.get(index).cloned(),
            None => (index < self.size).then_some(RowLocation {
                level: LevelKey::Root,
                local_index: index,
            }),
        }
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn set_size(&mut self, size: usize) {
        self.size = size;
        if self.layout.is_none() {
            self.window.virtual_count = size;
        }
    }

    fn revalidate(&mut self) {
        self.revalidations += 1;
    }

    fn replace_rendered(&mut self, level: &LevelKey<K>, start: usize, items: &[Item<K, T>]) {
        for (i, item) in items.iter().enumerate() {
            if let Some(row) = self.rendered.get_mut(&(level.clone(), start + i)) {
                *row = item.clone();
            }
        }
    }

    fn clear_rendered(&mut self, level: &LevelKey<K>, start: usize, len: usize) {
        for index in start..start.saturating_add(len) {
            self.rendered.remove(&(level.clone(), index));
        }
    }

    fn forget_level(&mut self, level: &LevelKey<K>) {
        self.rendered.retain(|(row_level, _), _| row_level != level);
    }

    fn reset_rendered(&mut self) {
        self.rendered.clear();
    }

    fn expand(&mut self, key: &K) {
        if !self.expanded.contains(key) {
            self.expanded.push(key.clone());
        }
    }

    fn collapse(&mut self, key: &K) {
        self.expanded.retain(|k| k != key);
    }

    fn clear_expanded(&mut self) {
        self.expanded.clear();
    }

    fn set_selected_items(&mut self, items: &[&Item<K, T>]) {
        self.selected = items.iter().map(|item| item.key.clone()).collect();
    }

    fn set_details_opened_items(&mut self, keys: &[K]) {
        self.details_opened = keys.to_vec();
    }

    fn set_identity_path(&mut self, path: Option<&str>) {
        self.identity_path = path.map(String::from);
    }

    fn selection_event(&mut self, event: SelectionEvent<K>) {
        self.events.push(event);
    }
}
