//! Paginated document reader engine.
//!
//! A document is a list of remote page images laid out in one scroll
//! column. [`ReaderSession`] ties together the [`PageLayout`], the
//! [`Scrollbar`] and a [`Prefetcher`] that loads pages ahead of the reader.

pub mod config;
pub mod layout;
pub mod prefetch;
pub mod scrollbar;
pub mod session;

pub use config::ReaderConfig;
pub use layout::PageLayout;
pub use prefetch::{PrefetchEvent, Prefetcher};
pub use scrollbar::{Scrollbar, ThumbMetrics};
pub use session::{ReaderSession, ReaderState};
