//! Core types for ghfeed.
//!
//! This crate provides the types shared by ghfeed-server and the ghfeed CLI:
//! - `Event` and `EventKind` as delivered by the GitHub events API
//! - `EventDetails`, the normalized per-kind view of an event payload
//! - `PageDescriptor` and `LinkHeader` for pagination
//! - `SavedStore` holding the read-later and favorites collections

pub mod activity;
pub mod details;
pub mod error;
pub mod event;
pub mod filter;
pub mod pagination;
pub mod saved;

pub use activity::ActivityView;
pub use details::EventDetails;
pub use error::{FeedError, FeedResult};
pub use event::{Event, EventKind, Repo};
pub use pagination::{ITEMS_PER_PAGE, LinkHeader, PageDescriptor, PaginationMode};
pub use saved::{Collection, CollectionKind, SavedItem, SavedStore};
