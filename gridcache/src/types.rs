use alloc::string::String;

/// Identifies one level of the tree: the root list or the children of an expanded row.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LevelKey<K> {
    Root,
    Parent(K),
}

impl<K> LevelKey<K> {
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    pub fn parent(&self) -> Option<&K> {
        match self {
            Self::Root => None,
            Self::Parent(k) => Some(k),
        }
    }

    pub fn from_parent(parent: Option<K>) -> Self {
        match parent {
            Some(k) => Self::Parent(k),
            None => Self::Root,
        }
    }
}

/// An inclusive range of page indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRange {
    pub first: usize,
    pub last: usize, // inclusive
}

impl PageRange {
    pub fn new(first: usize, last: usize) -> Self {
        Self { first, last }
    }

    pub fn contains(&self, page: usize) -> bool {
        page >= self.first && page <= self.last
    }

    pub fn page_count(&self) -> usize {
        self.last.saturating_sub(self.first).saturating_add(1)
    }
}

/// A row supplied by the remote source.
///
/// Apart from `selected` and `details_opened`, which the cache maintains, items are treated as
/// immutable: a newer version of the same key replaces the old one wholesale.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Item<K, T> {
    pub key: K,
    pub data: T,
    /// `None` means the source did not say; `Some(false)` is an explicit deselection.
    pub selected: Option<bool>,
    pub details_opened: Option<bool>,
    /// Key of the expanded row this item is a child of.
    pub parent_key: Option<K>,
    /// Flattened position of a nested item, when the source reports it.
    pub scaled_index: Option<usize>,
}

impl<K, T> Item<K, T> {
    pub fn new(key: K, data: T) -> Self {
        Self {
            key,
            data,
            selected: None,
            details_opened: None,
            parent_key: None,
            scaled_index: None,
        }
    }

    pub fn with_parent(mut self, parent_key: K) -> Self {
        self.parent_key = Some(parent_key);
        self
    }

    pub fn with_selected(mut self, selected: Option<bool>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_details_opened(mut self, details_opened: bool) -> Self {
        self.details_opened = Some(details_opened);
        self
    }

    pub fn is_selected(&self) -> bool {
        self.selected == Some(true)
    }

    pub fn is_details_opened(&self) -> bool {
        self.details_opened == Some(true)
    }
}

/// What a page callback receives.
#[derive(Debug, PartialEq)]
pub enum PageData<'a, K, T> {
    /// The cached items of the page.
    Loaded(&'a [Item<K, T>]),
    /// The source finished a batch without sending this page: `len` blank rows.
    Placeholder(usize),
    /// The request was dropped (level evicted or a newer request took its slot).
    Discarded,
}

impl<K, T> PageData<'_, K, T> {
    pub fn len(&self) -> usize {
        match self {
            Self::Loaded(items) => items.len(),
            Self::Placeholder(len) => *len,
            Self::Discarded => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A viewport request for one page of one level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataRequest<K> {
    pub page: usize,
    pub page_size: usize,
    /// Key of the expanded row whose children are requested; `None` for the root list.
    pub parent: Option<K>,
}

impl<K> DataRequest<K> {
    pub fn root(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size,
            parent: None,
        }
    }

    pub fn child(page: usize, page_size: usize, parent: K) -> Self {
        Self {
            page,
            page_size,
            parent: Some(parent),
        }
    }
}

/// The viewport's current rendering window, in flattened (tree-wide) row indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportWindow {
    pub start: usize,
    pub end: usize, // exclusive
    pub offset: usize,
    pub virtual_count: usize,
}

impl ViewportWindow {
    pub fn new(start: usize, end: usize, offset: usize, virtual_count: usize) -> Self {
        Self {
            start,
            end,
            offset,
            virtual_count,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where a flattened row index lives: its level and its index within that level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowLocation<K> {
    pub level: LevelKey<K>,
    pub local_index: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SortDirection {
    #[cfg_attr(feature = "serde", serde(rename = "asc"))]
    Ascending,
    #[cfg_attr(feature = "serde", serde(rename = "desc"))]
    Descending,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sorter {
    pub path: String,
    pub direction: Option<SortDirection>,
}

impl Sorter {
    pub fn new(path: impl Into<String>, direction: Option<SortDirection>) -> Self {
        Self {
            path: path.into(),
            direction,
        }
    }
}

/// Who started a selection change.
///
/// User-originated changes are reported to the remote source; server-originated ones are only
/// reflected locally so they don't echo back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Origin {
    User,
    Server,
}

/// A local selection notification, fired for server-originated changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectionEvent<K> {
    Selected(K),
    Deselected(K),
}
