use alloc::vec::Vec;

use gridcache::{
    CacheKey, CacheOptions, DataRequest, GridCache, Item, Origin, PageData, Result, Sorter,
};

use crate::{HeadlessViewport, Inbound, Mailbox, Outbound};

/// A framework-neutral connector: a [`GridCache`] wired to a [`HeadlessViewport`] and a
/// [`Mailbox`].
///
/// This type holds no UI objects and no transport. Hosts drive it by calling:
/// - `scroll_to` / `request_page` when the widget scrolls or asks for rows
/// - `on_message` (or `on_json`) for every frame from the data source
/// - `take_outbound` afterwards, and sending the result to the data source
#[derive(Debug)]
pub struct Connector<K, T> {
    cache: GridCache<K, T, HeadlessViewport<K, T>, Mailbox<K>>,
}

impl<K: CacheKey, T: Clone> Connector<K, T> {
    pub fn new(options: CacheOptions) -> Self {
        Self {
            cache: GridCache::new(options, HeadlessViewport::new(), Mailbox::new()),
        }
    }

    pub fn from_cache(cache: GridCache<K, T, HeadlessViewport<K, T>, Mailbox<K>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &GridCache<K, T, HeadlessViewport<K, T>, Mailbox<K>> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut GridCache<K, T, HeadlessViewport<K, T>, Mailbox<K>> {
        &mut self.cache
    }

    pub fn into_cache(self) -> GridCache<K, T, HeadlessViewport<K, T>, Mailbox<K>> {
        self.cache
    }

    pub fn viewport(&self) -> &HeadlessViewport<K, T> {
        self.cache.viewport()
    }

    pub fn viewport_mut(&mut self) -> &mut HeadlessViewport<K, T> {
        self.cache.viewport_mut()
    }

    pub fn scroll_to(&mut self, start: usize, end: usize) {
        self.cache.viewport_mut().scroll_to(start, end);
    }

    /// Asks for one page of the root (`parent = None`) or of an expanded row's children.
    pub fn request_page(
        &mut self,
        page: usize,
        parent: Option<K>,
        callback: impl FnOnce(PageData<'_, K, T>, Option<usize>) + 'static,
    ) -> Result<()> {
        let request = DataRequest {
            page,
            page_size: self.cache.page_size(),
            parent,
        };
        self.cache.provide_data(request, callback)
    }

    /// Applies one message from the data source.
    pub fn on_message(&mut self, message: Inbound<K, T>) -> Result<()> {
        message.apply(&mut self.cache)
    }

    /// Decodes and applies one JSON frame from the data source.
    #[cfg(feature = "json")]
    pub fn on_json(&mut self, frame: &str) -> Result<()>
    where
        K: serde::de::DeserializeOwned,
        T: serde::de::DeserializeOwned,
    {
        crate::decode_inbound(frame)?.apply(&mut self.cache)
    }

    /// Messages for the data source queued since the last call, oldest first.
    pub fn take_outbound(&mut self) -> Vec<Outbound<K>> {
        self.cache.remote_mut().drain()
    }

    /// The user activated a row (click / keyboard), or deactivated the current one.
    pub fn activate(&mut self, item: Option<Item<K, T>>) {
        self.cache.set_active_item(item);
    }

    pub fn select(&mut self, item: Item<K, T>) {
        self.cache
            .select_items(core::slice::from_ref(&item), Origin::User);
    }

    pub fn deselect(&mut self, item: Item<K, T>) {
        self.cache
            .deselect_items(core::slice::from_ref(&item), Origin::User);
    }

    pub fn toggle_expanded(&mut self, key: &K) {
        let expanded = self.cache.is_expanded(key);
        self.cache.set_row_expanded(key, !expanded);
    }

    pub fn sort_by(&mut self, sorters: &[Sorter]) {
        self.cache.sorters_changed(sorters);
    }
}
