use alloc::string::ToString;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::key::{CacheKey, KeyMap};
use crate::{Error, Item};

/// How many rows may be selected at once.
///
/// The mode is configuration: it only changes through `set_mode`, which also drops the current
/// selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum SelectionMode {
    None,
    #[default]
    Single,
    Multi,
}

impl SelectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::Single => "SINGLE",
            Self::Multi => "MULTI",
        }
    }
}

impl FromStr for SelectionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NONE" => Ok(Self::None),
            "SINGLE" => Ok(Self::Single),
            "MULTI" => Ok(Self::Multi),
            other => Err(Error::InvalidSelectionMode(other.to_string())),
        }
    }
}

/// Keys whose selection state changed during one `select`/`deselect` call, in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SelectionDelta<K> {
    /// Keys dropped because single mode replaces rather than adds.
    pub replaced: Vec<K>,
    pub changed: Vec<K>,
}

impl<K> SelectionDelta<K> {
    pub fn is_empty(&self) -> bool {
        self.replaced.is_empty() && self.changed.is_empty()
    }
}

/// Selected identities plus the latest snapshot of each selected item.
#[derive(Clone, Debug)]
pub struct Selection<K, T> {
    mode: SelectionMode,
    selected: KeyMap<K, Item<K, T>>,
}

impl<K: CacheKey, T: Clone> Selection<K, T> {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: KeyMap::new(),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub(crate) fn set_mode(&mut self, mode: SelectionMode) -> Vec<K> {
        self.mode = mode;
        core::mem::take(&mut self.selected).into_keys().collect()
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.selected.keys()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item<K, T>> + '_ {
        self.selected.values()
    }

    /// Records `items` as selected. Keys already selected are refreshed but not reported.
    ///
    /// `None` mode ignores the call, `Single` mode only takes the first item and replaces any
    /// previous selection, `Multi` mode adds all of them.
    pub(crate) fn select(&mut self, items: &[Item<K, T>]) -> SelectionDelta<K> {
        let mut delta = SelectionDelta {
            replaced: Vec::new(),
            changed: Vec::new(),
        };
        let take = match self.mode {
            SelectionMode::None => 0,
            SelectionMode::Single => 1,
            SelectionMode::Multi => items.len(),
        };
        for item in items.iter().take(take) {
            let newly = if self.mode == SelectionMode::Single {
                let previous = core::mem::take(&mut self.selected);
                let was_selected = previous.contains_key(&item.key);
                delta
                    .replaced
                    .extend(previous.into_keys().filter(|k| *k != item.key));
                !was_selected
            } else {
                !self.selected.contains_key(&item.key)
            };
            let mut snapshot = item.clone();
            snapshot.selected = Some(true);
            self.selected.insert(item.key.clone(), snapshot);
            if newly {
                delta.changed.push(item.key.clone());
            }
        }
        delta
    }

    /// Drops `items` from the selection. Mirrors `select`: nothing in `None` mode, only the first
    /// item in `Single` mode.
    pub(crate) fn deselect(&mut self, items: &[Item<K, T>]) -> SelectionDelta<K> {
        let mut delta = SelectionDelta {
            replaced: Vec::new(),
            changed: Vec::new(),
        };
        let take = match self.mode {
            SelectionMode::None => 0,
            SelectionMode::Single => 1,
            SelectionMode::Multi => items.len(),
        };
        for item in items.iter().take(take) {
            if self.selected.remove(&item.key).is_some() {
                delta.changed.push(item.key.clone());
            }
        }
        delta
    }

    /// Re-applies the selected flag to a freshly loaded item and refreshes the stored snapshot.
    ///
    /// Returns `true` if the item is selected.
    pub(crate) fn reconcile(&mut self, item: &mut Item<K, T>) -> bool {
        let Some(snapshot) = self.selected.get_mut(&item.key) else {
            return false;
        };
        item.selected = Some(true);
        *snapshot = item.clone();
        true
    }
}
