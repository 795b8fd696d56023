use alloc::string::String;
use alloc::vec::Vec;

use gridcache::{
    CacheKey, GridCache, Item, Origin, RemoteSource, Result, SelectionMode, Sorter, Viewport,
};

/// A push from the remote data source, as it arrives off the wire.
///
/// Each variant maps onto one inbound entry point of [`GridCache`]; see [`Inbound::apply`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum Inbound<K, T> {
    /// Rows starting at a page-aligned `offset` of the root or of `parent`'s children.
    ApplyPage {
        offset: usize,
        items: Vec<Item<K, T>>,
        parent: Option<K>,
    },
    /// New versions of rows that may already be cached anywhere in the tree.
    ApplyUpdates { items: Vec<Item<K, T>> },
    ClearRange {
        offset: usize,
        length: usize,
        parent: Option<K>,
    },
    ConfirmBatch { id: u64 },
    ConfirmChildBatch { id: u64, parent: K, level_size: usize },
    SetTotalSize { size: usize },
    SetIdentityPath {
        path: Option<String>,
    },
    InvalidateAll,
    ResetAll,
    SetExpanded { keys: Vec<K> },
    SetCollapsed { keys: Vec<K> },
    SetSelectionMode { mode: SelectionMode },
    SetDetailsVisibleOnClick { visible: bool },
    /// Server-side selection: applied locally without being echoed back.
    Select { items: Vec<Item<K, T>> },
    Deselect { items: Vec<Item<K, T>> },
}

impl<K: CacheKey, T: Clone> Inbound<K, T> {
    /// Feeds this message into `cache`.
    pub fn apply<V, R>(self, cache: &mut GridCache<K, T, V, R>) -> Result<()>
    where
        V: Viewport<K, T>,
        R: RemoteSource<K>,
    {
        match self {
            Self::ApplyPage {
                offset,
                items,
                parent,
            } => cache.apply_page(offset, items, parent)?,
            Self::ApplyUpdates { items } => cache.apply_updates(items)?,
            Self::ClearRange {
                offset,
                length,
                parent,
            } => cache.clear_range(offset, length, parent)?,
            Self::ConfirmBatch { id } => cache.confirm_batch(id),
            Self::ConfirmChildBatch {
                id,
                parent,
                level_size,
            } => cache.confirm_child_batch(id, parent, level_size),
            Self::SetTotalSize { size } => cache.set_total_size(size),
            Self::SetIdentityPath { path } => cache.set_identity_path(path),
            Self::InvalidateAll => cache.invalidate_all(),
            Self::ResetAll => cache.reset_all(),
            Self::SetExpanded { keys } => cache.set_expanded(&keys),
            Self::SetCollapsed { keys } => cache.set_collapsed(&keys),
            Self::SetSelectionMode { mode } => cache.set_selection_mode(mode),
            Self::SetDetailsVisibleOnClick { visible } => cache.set_details_visible_on_click(visible),
            Self::Select { items } => cache.select_items(&items, Origin::Server),
            Self::Deselect { items } => cache.deselect_items(&items, Origin::Server),
        }
        Ok(())
    }
}

/// A message for the remote data source, produced by [`crate::Mailbox`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum Outbound<K> {
    RequestRange {
        offset: usize,
        count: usize,
    },
    RequestChildRange {
        page: usize,
        offset: usize,
        count: usize,
        parent: K,
    },
    Select {
        key: K,
    },
    Deselect {
        key: K,
    },
    DetailsVisible {
        key: Option<K>,
    },
    SortersChanged {
        sorters: Vec<Sorter>,
    },
    ExpandedState {
        key: K,
        expanded: bool,
    },
    AcknowledgeBatch {
        id: u64,
    },
    AcknowledgeChildBatch {
        id: u64,
        parent: K,
    },
}

impl<K> Outbound<K> {
    /// Whether this message asks the source for rows.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::RequestRange { .. } | Self::RequestChildRange { .. })
    }
}
