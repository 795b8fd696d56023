use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::key::{CacheKey, KeyMap};
use crate::{LevelKey, PageData};

/// A viewport callback waiting for one page.
///
/// The second argument is the level size for child levels (when known) and `None` for the root.
pub type PageCallback<K, T> = Box<dyn FnOnce(PageData<'_, K, T>, Option<usize>)>;

/// Dispatch state of a page when new data (or a clear) reaches it.
pub(crate) enum PageStatus<C> {
    /// The viewport is blocked on this page: deliver through the callback.
    AwaitingCallback(C),
    /// Nobody is waiting: the viewport already shows the page and gets refreshed in place.
    Cached,
}

/// At most one outstanding callback per (level, page).
pub(crate) struct PendingRequests<K, T> {
    slots: KeyMap<LevelKey<K>, BTreeMap<usize, PageCallback<K, T>>>,
}

impl<K: CacheKey, T> PendingRequests<K, T> {
    pub fn new() -> Self {
        Self {
            slots: KeyMap::new(),
        }
    }

    /// Parks `callback` for `page`, returning the callback it displaced, if any.
    pub fn register(
        &mut self,
        level: LevelKey<K>,
        page: usize,
        callback: PageCallback<K, T>,
    ) -> Option<PageCallback<K, T>> {
        self.slots.entry(level).or_default().insert(page, callback)
    }

    pub fn take(&mut self, level: &LevelKey<K>, page: usize) -> Option<PageCallback<K, T>> {
        let slots = self.slots.get_mut(level)?;
        let callback = slots.remove(&page);
        if slots.is_empty() {
            self.slots.remove(level);
        }
        callback
    }

    pub fn take_status(
        &mut self,
        level: &LevelKey<K>,
        page: usize,
    ) -> PageStatus<PageCallback<K, T>> {
        match self.take(level, page) {
            Some(callback) => PageStatus::AwaitingCallback(callback),
            None => PageStatus::Cached,
        }
    }

    pub fn contains(&self, level: &LevelKey<K>, page: usize) -> bool {
        self.slots
            .get(level)
            .is_some_and(|slots| slots.contains_key(&page))
    }

    /// Pages of `level` with a parked callback, ascending.
    pub fn pages(&self, level: &LevelKey<K>) -> Vec<usize> {
        self.slots
            .get(level)
            .map(|slots| slots.keys().copied().collect())
            .unwrap_or_default()
    }

    pub fn drain_level(&mut self, level: &LevelKey<K>) -> Vec<PageCallback<K, T>> {
        self.slots
            .remove(level)
            .map(|slots| slots.into_values().collect())
            .unwrap_or_default()
    }

    pub fn drain_all(&mut self) -> Vec<PageCallback<K, T>> {
        core::mem::take(&mut self.slots)
            .into_values()
            .flat_map(|slots| slots.into_values())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.values().map(BTreeMap::len).sum()
    }
}
