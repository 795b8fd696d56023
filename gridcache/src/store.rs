use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::key::{CacheKey, KeyMap};
use crate::{Item, LevelKey};

/// The page cache of one level.
#[derive(Clone, Debug)]
pub(crate) struct Level<K, T> {
    pub pages: BTreeMap<usize, Vec<Item<K, T>>>,
    /// Total row count, once reported. The root's size is the dataset size.
    pub size: Option<usize>,
    /// Keys of rows in this level that own a child level.
    pub children: Vec<K>,
}

impl<K, T> Level<K, T> {
    fn new(size: Option<usize>) -> Self {
        Self {
            pages: BTreeMap::new(),
            size,
            children: Vec::new(),
        }
    }

    pub fn items(&self) -> impl Iterator<Item = &Item<K, T>> + '_ {
        self.pages.values().flatten()
    }
}

/// Page store plus tree index: every known level, keyed by its parent.
///
/// The root level always exists. Child levels are created on first reference and hang off the
/// level that holds their parent row, which is what `find_level_and_local_index_by_key` walks.
#[derive(Clone, Debug)]
pub(crate) struct PageStore<K, T> {
    page_size: usize,
    levels: KeyMap<LevelKey<K>, Level<K, T>>,
}

impl<K: CacheKey, T> PageStore<K, T> {
    pub fn new(page_size: usize) -> Self {
        let mut levels = KeyMap::new();
        levels.insert(LevelKey::Root, Level::new(Some(0)));
        Self { page_size, levels }
    }

    pub fn levels(&self) -> impl Iterator<Item = (&LevelKey<K>, &Level<K, T>)> + '_ {
        self.levels.iter()
    }

    pub fn contains_level(&self, level: &LevelKey<K>) -> bool {
        self.levels.contains_key(level)
    }

    /// Returns the level, creating it (and linking it under its parent row's level) if needed.
    pub fn resolve_level(&mut self, level: &LevelKey<K>) -> &mut Level<K, T> {
        if !self.levels.contains_key(level) {
            if let LevelKey::Parent(parent) = level {
                let owner = self
                    .find_level_and_local_index_by_key(parent)
                    .map(|(owner, _)| owner)
                    .unwrap_or(LevelKey::Root);
                if let Some(owner) = self.levels.get_mut(&owner) {
                    if !owner.children.contains(parent) {
                        owner.children.push(parent.clone());
                    }
                }
            }
            gtrace!(level = ?level, "PageStore::resolve_level: created");
        }
        self.levels.entry(level.clone()).or_insert_with(|| Level::new(None))
    }

    pub fn level_size(&self, level: &LevelKey<K>) -> Option<usize> {
        self.levels.get(level).and_then(|l| l.size)
    }

    pub fn set_level_size(&mut self, level: &LevelKey<K>, size: usize) {
        self.resolve_level(level).size = Some(size);
    }

    pub fn get_page(&self, level: &LevelKey<K>, page: usize) -> Option<&[Item<K, T>]> {
        self.levels
            .get(level)
            .and_then(|l| l.pages.get(&page))
            .map(Vec::as_slice)
    }

    pub fn has_page(&self, level: &LevelKey<K>, page: usize) -> bool {
        self.get_page(level, page).is_some()
    }

    pub fn has_pages(&self, level: &LevelKey<K>) -> bool {
        self.levels.get(level).is_some_and(|l| !l.pages.is_empty())
    }

    /// Loaded page indexes of `level` inside `pages`, ascending.
    pub fn page_indexes(&self, level: &LevelKey<K>, pages: core::ops::Range<usize>) -> Vec<usize> {
        self.levels
            .get(level)
            .map(|l| l.pages.range(pages).map(|(&page, _)| page).collect())
            .unwrap_or_default()
    }

    pub fn put_page(&mut self, level: &LevelKey<K>, page: usize, items: Vec<Item<K, T>>) {
        self.resolve_level(level).pages.insert(page, items);
    }

    pub fn clear_page(&mut self, level: &LevelKey<K>, page: usize) -> Option<Vec<Item<K, T>>> {
        self.levels.get_mut(level)?.pages.remove(&page)
    }

    /// Drops every page of `level` but keeps the level itself.
    pub fn clear_level(&mut self, level: &LevelKey<K>) -> Vec<Item<K, T>> {
        let Some(l) = self.levels.get_mut(level) else {
            return Vec::new();
        };
        core::mem::take(&mut l.pages).into_values().flatten().collect()
    }

    /// Removes a child level and every level nested below it.
    ///
    /// The root cannot be removed; use `clear_level` for it.
    pub fn evict_level(&mut self, level: &LevelKey<K>) -> Vec<(LevelKey<K>, Level<K, T>)> {
        let LevelKey::Parent(parent) = level else {
            return Vec::new();
        };
        for l in self.levels.values_mut() {
            l.children.retain(|k| k != parent);
        }

        let mut removed = Vec::new();
        let mut stack = Vec::from([level.clone()]);
        while let Some(next) = stack.pop() {
            if let Some(l) = self.levels.remove(&next) {
                stack.extend(l.children.iter().cloned().map(LevelKey::Parent));
                removed.push((next, l));
            }
        }
        removed
    }

    /// Removes every child level, keeping the root's pages.
    pub fn evict_non_root(&mut self) -> Vec<(LevelKey<K>, Level<K, T>)> {
        let root = self
            .levels
            .remove(&LevelKey::Root)
            .map(|mut root| {
                root.children.clear();
                root
            })
            .unwrap_or_else(|| Level::new(Some(0)));
        let removed = core::mem::take(&mut self.levels).into_iter().collect();
        self.levels.insert(LevelKey::Root, root);
        removed
    }

    /// Drops everything, leaving an empty root of size zero.
    pub fn reset(&mut self) -> Vec<(LevelKey<K>, Level<K, T>)> {
        let removed = core::mem::take(&mut self.levels).into_iter().collect();
        self.levels.insert(LevelKey::Root, Level::new(Some(0)));
        removed
    }

    /// Position of `key` among the loaded pages of `level`, as `(page, index in page)`.
    pub fn locate_in_level(&self, level: &LevelKey<K>, key: &K) -> Option<(usize, usize)> {
        let l = self.levels.get(level)?;
        l.pages.iter().find_map(|(&page, items)| {
            items
                .iter()
                .position(|item| item.key == *key)
                .map(|index| (page, index))
        })
    }

    /// Finds the level holding `key` and its index within that level.
    ///
    /// Scans the root's loaded items first, then each child level depth-first. Runs in
    /// O(loaded items), so it is only used on selection and update events.
    pub fn find_level_and_local_index_by_key(&self, key: &K) -> Option<(LevelKey<K>, usize)> {
        self.search(&LevelKey::Root, key, 0)
    }

    fn search(&self, level: &LevelKey<K>, key: &K, depth: usize) -> Option<(LevelKey<K>, usize)> {
        // Malformed data could make a row its own ancestor.
        if depth > self.levels.len() {
            return None;
        }
        let l = self.levels.get(level)?;
        if let Some((page, index)) = self.locate_in_level(level, key) {
            return Some((level.clone(), page * self.page_size + index));
        }
        l.children.iter().find_map(|child| {
            self.search(&LevelKey::Parent(child.clone()), key, depth + 1)
        })
    }

    pub fn find_item(&self, key: &K) -> Option<&Item<K, T>> {
        let (level, index) = self.find_level_and_local_index_by_key(key)?;
        let (page, offset) = (index / self.page_size, index % self.page_size);
        self.get_page(&level, page)?.get(offset)
    }

    pub fn find_item_mut(&mut self, key: &K) -> Option<&mut Item<K, T>> {
        let (level, index) = self.find_level_and_local_index_by_key(key)?;
        let (page, offset) = (index / self.page_size, index % self.page_size);
        self.levels
            .get_mut(&level)?
            .pages
            .get_mut(&page)?
            .get_mut(offset)
    }

    pub fn replace_item(
        &mut self,
        level: &LevelKey<K>,
        page: usize,
        index: usize,
        item: Item<K, T>,
    ) -> bool {
        let Some(slot) = self
            .levels
            .get_mut(level)
            .and_then(|l| l.pages.get_mut(&page))
            .and_then(|items| items.get_mut(index))
        else {
            return false;
        };
        *slot = item;
        true
    }
}
