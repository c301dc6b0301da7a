//! Caching subsystem.
//!
//! Two independent caches:
//!
//! - [`CatalogIndex`]: the whole problem set as one TTL-refreshed snapshot
//!   with slug and display-id indices. Refreshes are exclusive and fail open.
//!
//! - [`DetailCache`]: full problem records, filled on first request and
//!   never refreshed. Unbounded unless configured otherwise.

pub mod catalog;
pub mod detail;

pub use catalog::{CatalogIndex, CatalogStatus, DEFAULT_TTL, Snapshot};
pub use detail::{DetailCache, DetailCacheConfig};
