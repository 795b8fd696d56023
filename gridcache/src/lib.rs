//! A headless lazy paging cache for virtualized list and tree grids.
//!
//! For adapter-level utilities (wire messages, a queueing remote source, an in-memory viewport),
//! see the `gridcache-adapter` crate.
//!
//! A virtualized viewport only knows "give me rows `[start, start + count)` of parent P". A remote
//! data source speaks in fixed-size pages and answers asynchronously, possibly out of order and
//! more than once. [`GridCache`] reconciles the two:
//!
//! - it serves cached pages immediately and parks callbacks for missing ones,
//! - it turns bursts of per-page requests into one buffered page-range fetch per level, and never
//!   re-requests an unchanged range,
//! - it keeps one page cache per tree level, dropped on collapse or invalidation,
//! - it keeps selection (none / single / multi) stable across page reloads.
//!
//! It is UI-agnostic. The viewport implements [`Viewport`], the transport implements
//! [`RemoteSource`], and pushes from the source are fed back through the `apply_*`/`confirm_*`
//! entry points.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod cache;
mod error;
mod key;
mod options;
mod pending;
mod range;
mod remote;
mod selection;
mod state;
mod store;
mod types;
mod viewport;


pub use cache::GridCache;
pub use error::{Error, Result};
pub use key::CacheKey;
pub use options::{CacheOptions, DEFAULT_PAGE_SIZE};
pub use pending::PageCallback;
pub use range::{FetchRange, needed_pages};
pub use remote::RemoteSource;
pub use selection::{Selection, SelectionMode};
pub use state::CacheStats;
pub use types::{
    DataRequest, Item, LevelKey, Origin, PageData, PageRange, RowLocation, SelectionEvent,
    SortDirection, Sorter, ViewportWindow,
};
pub use viewport::Viewport;
