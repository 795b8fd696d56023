use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::slice;

use crate::key::{CacheKey, KeySet};
use crate::pending::{PageStatus, PendingRequests};
use crate::range::{RangeTracker, needed_pages};
use crate::selection::Selection;
use crate::store::{Level, PageStore};
use crate::{
    CacheOptions, CacheStats, DataRequest, Error, Item, LevelKey, Origin, PageData, PageRange,
    RemoteSource, Result, SelectionEvent, SelectionMode, Sorter, Viewport,
};

/// A lazy paging cache sitting between a virtualized viewport and a remote data source.
///
/// One instance belongs to one viewport: it is created when the viewport attaches and dropped
/// when it detaches. All entry points run synchronously on the caller's thread.
///
/// Viewport-facing entry points:
/// - [`GridCache::provide_data`] answers "rows of page P of level L", from cache when possible
///   and otherwise by parking the callback and (maybe) asking the source for a page range.
/// - [`GridCache::set_active_item`], [`GridCache::set_row_expanded`] and
///   [`GridCache::sorters_changed`] turn user interaction into source notifications.
///
/// Source-facing entry points ([`GridCache::apply_page`], [`GridCache::apply_updates`],
/// [`GridCache::clear_range`], [`GridCache::confirm_batch`], ...) merge pushes into the cache and
/// resolve parked callbacks.
pub struct GridCache<K, T, V, R> {
    options: CacheOptions,
    store: PageStore<K, T>,
    pending: PendingRequests<K, T>,
    ranges: RangeTracker<K>,
    selection: Selection<K, T>,
    expanded: KeySet<K>,
    details_opened: KeySet<K>,
    active: Option<Item<K, T>>,

    viewport: V,
    remote: R,

    revalidate_depth: usize,
    revalidate_pending: bool,
}

impl<K, T, V, R> GridCache<K, T, V, R>
where
    K: CacheKey,
    T: Clone,
    V: Viewport<K, T>,
    R: RemoteSource<K>,
{
    pub fn new(options: CacheOptions, mut viewport: V, remote: R) -> Self {
        let options = CacheOptions {
            page_size: options.page_size.max(1),
            ..options
        };
        gdebug!(
            page_size = options.page_size,
            selection_mode = options.selection_mode.as_str(),
            "GridCache::new"
        );
        viewport.set_size(0);
        viewport.set_identity_path(options.identity_path.as_deref());
        Self {
            store: PageStore::new(options.page_size),
            pending: PendingRequests::new(),
            ranges: RangeTracker::new(),
            selection: Selection::new(options.selection_mode),
            expanded: KeySet::new(),
            details_opened: KeySet::new(),
            active: None,
            viewport,
            remote,
            revalidate_depth: 0,
            revalidate_pending: false,
            options,
        }
    }

    pub fn options(&self) -> &CacheOptions {
        &self.options
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    /// Total root row count as last reported by the source.
    pub fn size(&self) -> usize {
        self.store.level_size(&LevelKey::Root).unwrap_or(0)
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn remote_mut(&mut self) -> &mut R {
        &mut self.remote
    }

    pub fn into_parts(self) -> (V, R) {
        (self.viewport, self.remote)
    }

    pub fn selection(&self) -> &Selection<K, T> {
        &self.selection
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.selection.is_selected(key)
    }

    pub fn is_expanded(&self, key: &K) -> bool {
        self.expanded.contains(key)
    }

    pub fn is_details_opened(&self, key: &K) -> bool {
        self.details_opened.contains(key)
    }

    pub fn active_item(&self) -> Option<&Item<K, T>> {
        self.active.as_ref()
    }

    pub fn cached_page(&self, level: &LevelKey<K>, page: usize) -> Option<&[Item<K, T>]> {
        self.store.get_page(level, page)
    }

    pub fn has_level(&self, level: &LevelKey<K>) -> bool {
        self.store.contains_level(level)
    }

    pub fn level_size(&self, level: &LevelKey<K>) -> Option<usize> {
        self.store.level_size(level)
    }

    pub fn has_pending(&self, level: &LevelKey<K>, page: usize) -> bool {
        self.pending.contains(level, page)
    }

    pub fn last_requested_range(&self, level: &LevelKey<K>) -> Option<PageRange> {
        self.ranges.last_requested(level)
    }

    pub fn find_item(&self, key: &K) -> Option<&Item<K, T>> {
        self.store.find_item(key)
    }

    /// Level holding `key` and its index within that level (searches loaded pages only).
    pub fn find_level_and_local_index_by_key(&self, key: &K) -> Option<(LevelKey<K>, usize)> {
        self.store.find_level_and_local_index_by_key(key)
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats {
            pending_callbacks: self.pending.len(),
            selected: self.selection.len(),
            expanded: self.expanded.len(),
            ..CacheStats::default()
        };
        for (_, level) in self.store.levels() {
            stats.levels += 1;
            stats.cached_pages += level.pages.len();
            stats.cached_items += level.pages.values().map(Vec::len).sum::<usize>();
        }
        stats
    }

    /// Batches cache mutations into a single viewport revalidation.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        self.revalidate_depth = self.revalidate_depth.saturating_add(1);

        f(self);

        debug_assert!(self.revalidate_depth > 0, "revalidate_depth underflow");
        self.revalidate_depth = self.revalidate_depth.saturating_sub(1);
        if self.revalidate_depth == 0 && core::mem::take(&mut self.revalidate_pending) {
            self.viewport.revalidate();
        }
    }

    fn request_revalidate(&mut self) {
        if self.revalidate_depth > 0 {
            self.revalidate_pending = true;
            return;
        }
        self.viewport.revalidate();
    }

    // ---- viewport-facing -------------------------------------------------------------------

    /// Serves one page to the viewport.
    ///
    /// A cached page is delivered synchronously. Otherwise `callback` is parked until the page
    /// arrives (or a batch confirm resolves it), replacing any callback already parked for the
    /// same page; the replaced one receives [`PageData::Discarded`]. Either way the range tracker
    /// then decides whether the source needs to be asked for more pages.
    pub fn provide_data(
        &mut self,
        request: DataRequest<K>,
        callback: impl FnOnce(PageData<'_, K, T>, Option<usize>) + 'static,
    ) -> Result<()> {
        let page_size = self.options.page_size;
        if request.page_size != page_size {
            return Err(Error::InvalidPageSize {
                expected: page_size,
                actual: request.page_size,
            });
        }

        let level = LevelKey::from_parent(request.parent);
        let size = self.store.resolve_level(&level).size;
        // The viewport can ask for a page one past the end.
        let page = size.map_or(request.page, |size| request.page.min(size / page_size));
        let reply_size = self.reply_size(&level);

        match self.store.get_page(&level, page) {
            Some(items) => {
                gtrace!(level = ?level, page, "GridCache::provide_data: cache hit");
                callback(PageData::Loaded(items), reply_size);
            }
            None => {
                if let Some(superseded) =
                    self.pending
                        .register(level.clone(), page, Box::new(callback))
                {
                    gdebug!(level = ?level, page, "GridCache::provide_data: superseded callback");
                    superseded(PageData::Discarded, reply_size);
                }
            }
        }

        self.fetch(&level, page);
        Ok(())
    }

    fn fetch(&mut self, level: &LevelKey<K>, page: usize) {
        let page_size = self.options.page_size;
        // Child sizes are unknown until a confirm reports them.
        let max_page = self
            .store
            .level_size(level)
            .map(|size| size.saturating_sub(1) / page_size);
        let window = self.viewport.window();
        let viewport = &self.viewport;
        let pages = needed_pages(level, page, window, page_size, max_page, |index| {
            viewport.locate(index)
        });
        let Some(fetch) = self.ranges.track(level, pages, page_size) else {
            return;
        };

        gdebug!(
            level = ?level,
            first_page = fetch.pages.first,
            last_page = fetch.pages.last,
            offset = fetch.offset,
            count = fetch.count,
            "GridCache::fetch"
        );
        match level {
            LevelKey::Root => self.remote.request_range(fetch.offset, fetch.count),
            LevelKey::Parent(parent) => {
                self.remote
                    .request_child_range(page, fetch.offset, fetch.count, parent)
            }
        }
    }

    fn reply_size(&self, level: &LevelKey<K>) -> Option<usize> {
        match level {
            LevelKey::Root => None,
            LevelKey::Parent(_) => self.store.level_size(level),
        }
    }

    /// Reacts to the viewport's active row changing.
    ///
    /// In single-selection mode activating a row toggles its selection, and deactivating a
    /// selected row deselects it. Independently, when `details_visible_on_click` is set the source
    /// is told which row should show its details.
    pub fn set_active_item(&mut self, item: Option<Item<K, T>>) {
        let previous = core::mem::replace(&mut self.active, item.clone());

        if self.selection.mode() == SelectionMode::Single {
            match &item {
                None => {
                    if let Some(previous) =
                        previous.filter(|p| self.selection.is_selected(&p.key))
                    {
                        self.deselect_items(slice::from_ref(&previous), Origin::User);
                    }
                }
                Some(active) if self.selection.is_selected(&active.key) => {
                    self.deselect_items(slice::from_ref(active), Origin::User);
                }
                Some(active) => self.select_items(slice::from_ref(active), Origin::User),
            }
        }

        if self.options.details_visible_on_click {
            let open = item
                .as_ref()
                .filter(|active| {
                    !active.is_details_opened() && !self.details_opened.contains(&active.key)
                })
                .map(|active| &active.key);
            self.remote.notify_details_visible(open);
        }
    }

    /// Handles a user expanding or collapsing a row.
    ///
    /// Expanding notifies the source and the viewport. Collapsing also drops the row's child
    /// level (and everything below it) with its requested range, so the next expand fetches
    /// fresh data. Repeating the current state does nothing.
    pub fn set_row_expanded(&mut self, key: &K, expanded: bool) {
        if self.expanded.contains(key) == expanded {
            return;
        }
        self.remote.notify_expanded_state(key, expanded);
        if expanded {
            self.expand_row(key);
        } else {
            self.collapse_row(key);
        }
    }

    pub fn sorters_changed(&mut self, sorters: &[Sorter]) {
        gdebug!(count = sorters.len(), "GridCache::sorters_changed");
        self.remote.notify_sorters_changed(sorters);
    }

    fn expand_row(&mut self, key: &K) {
        self.expanded.insert(key.clone());
        self.store.resolve_level(&LevelKey::Parent(key.clone()));
        self.viewport.expand(key);
    }

    fn collapse_row(&mut self, key: &K) {
        self.expanded.remove(key);
        self.drop_level(&LevelKey::Parent(key.clone()));
        self.viewport.collapse(key);
    }

    // ---- selection -------------------------------------------------------------------------

    /// Selects `items` in order, following the selection mode.
    ///
    /// User-originated selections are reported to the source (which may still override them
    /// with a later push); server-originated ones only fire a local [`SelectionEvent`].
    pub fn select_items(&mut self, items: &[Item<K, T>], origin: Origin) {
        if origin == Origin::User && self.viewport.is_disabled() {
            gtrace!("GridCache::select_items: viewport disabled");
            return;
        }
        let delta = self.selection.select(items);
        if delta.is_empty() {
            return;
        }
        for key in &delta.replaced {
            self.set_cached_selected(key, None);
        }
        for key in &delta.changed {
            self.set_cached_selected(key, Some(true));
            match origin {
                Origin::User => self.remote.notify_select(key),
                Origin::Server => self
                    .viewport
                    .selection_event(SelectionEvent::Selected(key.clone())),
            }
        }
        self.publish_selection();
    }

    /// Deselects `items` in order; the mirror image of [`GridCache::select_items`].
    ///
    /// Unlike selection, deselection still goes through on a disabled viewport.
    pub fn deselect_items(&mut self, items: &[Item<K, T>], origin: Origin) {
        let delta = self.selection.deselect(items);
        if delta.is_empty() {
            return;
        }
        for key in &delta.changed {
            self.set_cached_selected(key, None);
            match origin {
                Origin::User => self.remote.notify_deselect(key),
                Origin::Server => self
                    .viewport
                    .selection_event(SelectionEvent::Deselected(key.clone())),
            }
        }
        self.publish_selection();
    }

    /// Switches selection mode, dropping the current selection.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        gdebug!(mode = mode.as_str(), "GridCache::set_selection_mode");
        self.options.selection_mode = mode;
        for key in self.selection.set_mode(mode) {
            self.set_cached_selected(&key, None);
        }
        self.publish_selection();
    }

    pub fn set_details_visible_on_click(&mut self, visible_on_click: bool) {
        self.options.details_visible_on_click = visible_on_click;
    }

    fn set_cached_selected(&mut self, key: &K, selected: Option<bool>) {
        if let Some(item) = self.store.find_item_mut(key) {
            item.selected = selected;
        }
    }

    fn publish_selection(&mut self) {
        let items: Vec<&Item<K, T>> = self.selection.items().collect();
        self.viewport.set_selected_items(&items);
    }

    fn publish_details(&mut self) {
        let keys: Vec<K> = self.details_opened.iter().cloned().collect();
        self.viewport.set_details_opened_items(&keys);
    }

    fn track_details(&mut self, item: &Item<K, T>) {
        if item.is_details_opened() {
            self.details_opened.insert(item.key.clone());
        } else {
            self.details_opened.remove(&item.key);
        }
    }

    // ---- source-facing ---------------------------------------------------------------------

    fn check_alignment(&self, offset: usize) -> Result<()> {
        let page_size = self.options.page_size;
        if offset % page_size != 0 {
            gwarn!(offset, page_size, "GridCache: misaligned offset");
            return Err(Error::MisalignedOffset { offset, page_size });
        }
        Ok(())
    }

    /// Stores rows pushed by the source, starting at the page-aligned `offset` of a level.
    ///
    /// Rows are split into pages. Each page first has the source's selection flags applied
    /// (server-originated, so nothing is echoed back), then is stored with the cache's own
    /// selection re-applied, then is handed to the callback waiting for it or, if none is
    /// waiting, refreshed in place in the viewport.
    pub fn apply_page(
        &mut self,
        offset: usize,
        items: Vec<Item<K, T>>,
        parent: Option<K>,
    ) -> Result<()> {
        self.check_alignment(offset)?;
        let page_size = self.options.page_size;
        let level = LevelKey::from_parent(parent);
        let first_page = offset / page_size;
        gdebug!(level = ?level, offset, count = items.len(), "GridCache::apply_page");

        self.batch_update(|this| {
            let mut rest = items.into_iter().peekable();
            let mut page = first_page;
            while rest.peek().is_some() {
                let slice: Vec<_> = rest.by_ref().take(page_size).collect();
                this.sync_source_selection(&slice);
                this.store_page(&level, page, slice);
                this.flush_page(&level, page);
                page += 1;
            }
        });
        Ok(())
    }

    fn sync_source_selection(&mut self, items: &[Item<K, T>]) {
        for item in items {
            let selected = self.selection.is_selected(&item.key);
            match item.selected {
                Some(true) if !selected => {
                    self.select_items(slice::from_ref(item), Origin::Server);
                }
                Some(false) if selected => {
                    self.deselect_items(slice::from_ref(item), Origin::Server);
                }
                _ => {}
            }
        }
    }

    fn store_page(&mut self, level: &LevelKey<K>, page: usize, mut items: Vec<Item<K, T>>) {
        let mut touched_selection = false;
        for item in &mut items {
            touched_selection |= self.selection.reconcile(item);
            self.track_details(item);
        }
        self.store.put_page(level, page, items);
        if touched_selection {
            self.publish_selection();
        }
        self.publish_details();
    }

    /// Pushes the current state of one page to the viewport.
    fn flush_page(&mut self, level: &LevelKey<K>, page: usize) {
        let start = page.saturating_mul(self.options.page_size);
        let reply_size = self.reply_size(level);
        match self.pending.take_status(level, page) {
            PageStatus::AwaitingCallback(callback) => match self.store.get_page(level, page) {
                Some(items) => callback(PageData::Loaded(items), reply_size),
                // Cleared while the viewport waits: keep waiting.
                None => {
                    self.pending.register(level.clone(), page, callback);
                }
            },
            PageStatus::Cached => {
                match self.store.get_page(level, page) {
                    Some(items) => self.viewport.replace_rendered(level, start, items),
                    None => {
                        self.viewport
                            .clear_rendered(level, start, self.options.page_size)
                    }
                }
                self.request_revalidate();
            }
        }
    }

    /// Replaces already cached rows by key, wherever they live.
    ///
    /// Each item is looked up in the level named by its `parent_key`; items that aren't cached
    /// are ignored. Touched pages are flushed once each, after every item is written.
    pub fn apply_updates(&mut self, items: Vec<Item<K, T>>) -> Result<()> {
        if let Some(item) = items
            .iter()
            .find(|item| item.parent_key.as_ref() == Some(&item.key))
        {
            return Err(Error::malformed(format!(
                "item {:?} is listed as its own parent",
                item.key
            )));
        }

        let mut dirty: Vec<(LevelKey<K>, usize)> = Vec::new();
        let mut touched_selection = false;
        for mut item in items {
            let level = LevelKey::from_parent(item.parent_key.clone());
            let Some((page, index)) = self.store.locate_in_level(&level, &item.key) else {
                gtrace!(key = ?item.key, "GridCache::apply_updates: not cached");
                continue;
            };
            touched_selection |= self.selection.reconcile(&mut item);
            self.track_details(&item);
            self.store.replace_item(&level, page, index, item);
            let entry = (level, page);
            if !dirty.contains(&entry) {
                dirty.push(entry);
            }
        }
        if touched_selection {
            self.publish_selection();
        }
        self.publish_details();

        self.batch_update(|this| {
            for (level, page) in dirty {
                this.flush_page(&level, page);
            }
        });
        Ok(())
    }

    /// Drops cached pages covering `[offset, offset + length)` of a level.
    ///
    /// Selected rows in those pages are deselected as server-originated changes. Waiting
    /// callbacks stay parked; pages nobody waits for are blanked in the viewport.
    pub fn clear_range(&mut self, offset: usize, length: usize, parent: Option<K>) -> Result<()> {
        self.check_alignment(offset)?;
        let level = LevelKey::from_parent(parent);
        if !self.store.has_pages(&level) {
            return Ok(());
        }
        let page_size = self.options.page_size;
        let first_page = offset / page_size;
        let end_page = first_page.saturating_add(length.div_ceil(page_size));
        let pages = self.store.page_indexes(&level, first_page..end_page);
        gdebug!(level = ?level, offset, length, pages = pages.len(), "GridCache::clear_range");

        self.batch_update(|this| {
            for page in pages {
                let selected: Vec<Item<K, T>> = this
                    .store
                    .get_page(&level, page)
                    .map(|items| {
                        items
                            .iter()
                            .filter(|item| this.selection.is_selected(&item.key))
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();
                if !selected.is_empty() {
                    this.deselect_items(&selected, Origin::Server);
                }
                if let Some(items) = this.store.clear_page(&level, page) {
                    for item in &items {
                        this.details_opened.remove(&item.key);
                    }
                }
                this.flush_page(&level, page);
            }
        });
        self.publish_details();
        Ok(())
    }

    /// End-of-batch barrier for the root level.
    ///
    /// Parked root callbacks are resolved with their cached page, or with a blank page of
    /// `page_size` rows, when the page lies in the last requested range. Pages outside it stay
    /// parked. The source then gets an acknowledgment for `id`.
    pub fn confirm_batch(&mut self, id: u64) {
        let level = LevelKey::Root;
        let range = self
            .ranges
            .last_requested(&level)
            .unwrap_or(PageRange::new(0, 0));
        gdebug!(id, first = range.first, last = range.last, "GridCache::confirm_batch");
        self.resolve_confirmed(&level, range, self.options.page_size);
        self.remote.acknowledge_batch(id);
    }

    /// End-of-batch barrier for the children of `parent`, which have `level_size` rows.
    ///
    /// Same rule as [`GridCache::confirm_batch`]; blank pages are `level_size` rows long.
    pub fn confirm_child_batch(&mut self, id: u64, parent: K, level_size: usize) {
        let level = LevelKey::Parent(parent);
        if self.store.contains_level(&level) {
            self.store.set_level_size(&level, level_size);
        }
        let range = self
            .ranges
            .last_requested(&level)
            .unwrap_or(PageRange::new(0, 0));
        gdebug!(id, level = ?level, level_size, "GridCache::confirm_child_batch");
        self.resolve_confirmed(&level, range, level_size);
        if let LevelKey::Parent(parent) = &level {
            self.remote.acknowledge_child_batch(id, parent);
        }
    }

    fn resolve_confirmed(&mut self, level: &LevelKey<K>, range: PageRange, blank_len: usize) {
        for page in self.pending.pages(level) {
            if !self.store.has_page(level, page) && !range.contains(page) {
                gtrace!(level = ?level, page, "GridCache: page left pending");
                continue;
            }
            let Some(callback) = self.pending.take(level, page) else {
                continue;
            };
            let reply_size = self.reply_size(level);
            match self.store.get_page(level, page) {
                Some(items) => callback(PageData::Loaded(items), reply_size),
                None => callback(PageData::Placeholder(blank_len), reply_size),
            }
        }
    }

    pub fn set_total_size(&mut self, size: usize) {
        gtrace!(size, "GridCache::set_total_size");
        self.store.set_level_size(&LevelKey::Root, size);
        self.viewport.set_size(size);
    }

    pub fn set_identity_path(&mut self, path: Option<String>) {
        self.viewport.set_identity_path(path.as_deref());
        self.options.identity_path = path;
    }

    /// Forgets every child level and every requested range, e.g. after a re-sort.
    pub fn invalidate_all(&mut self) {
        gdebug!("GridCache::invalidate_all");
        let removed = self.store.evict_non_root();
        self.discard_levels(removed);
        self.ranges.clear();
        self.request_revalidate();
    }

    /// Forgets everything, root included, for a full dataset replacement.
    pub fn reset_all(&mut self) {
        gdebug!("GridCache::reset_all");
        let removed = self.store.reset();
        self.discard_levels(removed);
        for callback in self.pending.drain_all() {
            callback(PageData::Discarded, None);
        }
        self.ranges.clear();
        self.viewport.set_size(0);
        self.viewport.reset_rendered();
        self.request_revalidate();
    }

    /// Expands rows on the source's behalf (no notification goes back).
    pub fn set_expanded(&mut self, keys: &[K]) {
        for key in keys {
            self.expand_row(key);
        }
    }

    /// Collapses rows on the source's behalf, dropping their child levels.
    pub fn set_collapsed(&mut self, keys: &[K]) {
        for key in keys {
            self.collapse_row(key);
        }
    }

    /// Collapses everything in the viewport. Cached child levels are kept.
    pub fn clear_expanded(&mut self) {
        self.expanded.clear();
        self.viewport.clear_expanded();
    }

    // ---- eviction --------------------------------------------------------------------------

    /// Drops a level's cache and requested range; child levels are removed with everything
    /// below them, the root is emptied but kept.
    pub fn evict_level(&mut self, level: &LevelKey<K>) {
        self.drop_level(level);
        self.request_revalidate();
    }

    /// Drops one cached page. A callback waiting for it keeps waiting.
    pub fn evict_page(&mut self, level: &LevelKey<K>, page: usize) {
        let Some(items) = self.store.clear_page(level, page) else {
            return;
        };
        for item in &items {
            self.details_opened.remove(&item.key);
        }
        self.publish_details();
        self.flush_page(level, page);
    }

    fn drop_level(&mut self, level: &LevelKey<K>) {
        match level {
            LevelKey::Root => {
                for item in self.store.clear_level(level) {
                    self.details_opened.remove(&item.key);
                }
                self.ranges.forget(level);
                for callback in self.pending.drain_level(level) {
                    callback(PageData::Discarded, None);
                }
                self.publish_details();
            }
            LevelKey::Parent(_) => {
                let removed = self.store.evict_level(level);
                self.discard_levels(removed);
            }
        }
    }

    fn discard_levels(&mut self, removed: Vec<(LevelKey<K>, Level<K, T>)>) {
        if removed.is_empty() {
            return;
        }
        for (key, level) in removed {
            gtrace!(level = ?key, pages = level.pages.len(), "GridCache: level discarded");
            self.ranges.forget(&key);
            let reply_size = match key {
                LevelKey::Root => None,
                LevelKey::Parent(_) => level.size,
            };
            for callback in self.pending.drain_level(&key) {
                callback(PageData::Discarded, reply_size);
            }
            self.viewport.forget_level(&key);
            for item in level.items() {
                self.details_opened.remove(&item.key);
            }
        }
        self.publish_details();
    }
}

impl<K: core::fmt::Debug, T, V, R> core::fmt::Debug for GridCache<K, T, V, R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridCache")
            .field("options", &self.options)
            .field("revalidate_depth", &self.revalidate_depth)
            .finish_non_exhaustive()
    }
}
