use alloc::string::String;

use crate::SelectionMode;

/// Page size used when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Configuration for [`crate::GridCache`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CacheOptions {
    /// Number of rows per page, shared by every level. Never zero.
    pub page_size: usize,
    pub selection_mode: SelectionMode,
    /// Whether activating a row toggles its details panel.
    pub details_visible_on_click: bool,
    /// Path of the identity property inside item payloads; forwarded to the viewport.
    pub identity_path: Option<String>,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl CacheOptions {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            selection_mode: SelectionMode::Single,
            details_visible_on_click: true,
            identity_path: None,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_selection_mode(mut self, selection_mode: SelectionMode) -> Self {
        self.selection_mode = selection_mode;
        self
    }

    pub fn with_details_visible_on_click(mut self, details_visible_on_click: bool) -> Self {
        self.details_visible_on_click = details_visible_on_click;
        self
    }

    pub fn with_identity_path(mut self, identity_path: Option<impl Into<String>>) -> Self {
        self.identity_path = identity_path.map(Into::into);
        self
    }
}
