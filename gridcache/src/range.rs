use crate::key::{CacheKey, KeyMap};
use crate::{LevelKey, PageRange, RowLocation, ViewportWindow};

/// A fetch the cache wants the remote source to serve, in rows of one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FetchRange {
    pub offset: usize,
    pub count: usize,
    pub pages: PageRange,
}

/// Computes the pages of `level` needed around the viewport window.
///
/// The window length doubles as read-ahead and read-behind buffer, so the scanned span is
/// `[start + offset - len, end + offset + len)` clamped to `[0, virtual_count)`. Rows that
/// `locate` places in another level are skipped: they neither widen nor narrow the range.
/// `requested_page` is always part of the result.
///
/// `max_page` caps the last page once the level's size is known.
pub fn needed_pages<K: PartialEq>(
    level: &LevelKey<K>,
    requested_page: usize,
    window: ViewportWindow,
    page_size: usize,
    max_page: Option<usize>,
    locate: impl Fn(usize) -> Option<RowLocation<K>>,
) -> PageRange {
    let page_size = page_size.max(1);
    let buffer = window.len();
    let first_index = (window.start + window.offset).saturating_sub(buffer);
    let last_index = window
        .end
        .saturating_add(window.offset)
        .saturating_add(buffer)
        .min(window.virtual_count);

    let mut first_page = requested_page;
    let mut last_page = requested_page;
    for index in first_index..last_index {
        let Some(row) = locate(index) else {
            continue;
        };
        if row.level != *level {
            continue;
        }
        let page = row.local_index / page_size;
        first_page = first_page.min(page);
        last_page = last_page.max(page);
    }

    if let Some(max_page) = max_page {
        last_page = last_page.min(max_page);
        first_page = first_page.min(last_page);
    }
    PageRange::new(first_page, last_page)
}

/// Remembers the last range requested per level so an unchanged range is never re-fetched.
#[derive(Clone, Debug)]
pub(crate) struct RangeTracker<K> {
    last_requested: KeyMap<LevelKey<K>, PageRange>,
}

impl<K: CacheKey> RangeTracker<K> {
    pub fn new() -> Self {
        Self {
            last_requested: KeyMap::new(),
        }
    }

    pub fn last_requested(&self, level: &LevelKey<K>) -> Option<PageRange> {
        self.last_requested.get(level).copied()
    }

    pub fn forget(&mut self, level: &LevelKey<K>) {
        self.last_requested.remove(level);
    }

    pub fn clear(&mut self) {
        self.last_requested.clear();
    }

    /// Records `pages` for `level` and returns the fetch to issue, or `None` when the same range
    /// was already requested or its row offsets don't fit in `usize`.
    pub fn track(
        &mut self,
        level: &LevelKey<K>,
        pages: PageRange,
        page_size: usize,
    ) -> Option<FetchRange> {
        if self.last_requested.get(level) == Some(&pages) {
            gtrace!(level = ?level, first = pages.first, last = pages.last, "RangeTracker: range unchanged");
            return None;
        }
        let offset = pages.first.checked_mul(page_size);
        let count = pages.page_count().checked_mul(page_size);
        let (Some(offset), Some(count)) = (offset, count) else {
            gwarn!(level = ?level, first = pages.first, last = pages.last, "RangeTracker: range overflows");
            return None;
        };
        self.last_requested.insert(level.clone(), pages);
        Some(FetchRange {
            offset,
            count,
            pages,
        })
    }
}
