//! Gateway implementations

mod builder;
mod cached;

pub use builder::{Mimir, MimirBuilder};
pub use cached::{CachedGateway, DEFAULT_SUBMISSION_LIMIT, RefreshTask};
