use alloc::string::String;

/// Result type alias for cache operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised synchronously by cache entry points.
///
/// Every entry point validates its input before touching the cache, so an error never leaves a
/// half-applied update behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The viewport asked for pages of a size the cache was not configured with.
    #[error("invalid page size {actual}, expected {expected}")]
    InvalidPageSize { expected: usize, actual: usize },

    #[error("invalid selection mode '{0}'")]
    InvalidSelectionMode(String),

    /// Pushed or cleared data does not start on a page boundary.
    #[error("offset {offset} is not aligned with the page size of {page_size}")]
    MisalignedOffset { offset: usize, page_size: usize },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl Error {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload(message.into())
    }

    /// Configuration errors: bad selection mode or page size.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidPageSize { .. } | Self::InvalidSelectionMode(_)
        )
    }
}
