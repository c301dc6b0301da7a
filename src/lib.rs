//! Mimir - caching gateway for the LeetCode GraphQL API
//!
//! This crate keeps the whole problem catalog as a TTL-refreshed snapshot
//! with slug and display-id indices, memoizes full problem records on first
//! request, and retries upstream calls with a fixed delay. Consumers talk to
//! the stable [`ProblemGateway`] trait.
//!
//! # Example
//!
//! ```rust,no_run
//! use mimir::{Mimir, ProblemGateway, RetryConfig};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> mimir::Result<()> {
//!     let gateway = Mimir::builder()
//!         .ttl(Duration::from_secs(600))
//!         .retry(RetryConfig::new().max_attempts(5))
//!         .build()?;
//!
//!     let problem = gateway.resolve("two-sum").await?;
//!     println!("{} {}", problem.frontend_id, problem.title);
//!
//!     let detail = gateway.detail("1").await?;
//!     println!("{} hints", detail.hints.len());
//!     Ok(())
//! }
//! ```
//!
//! # Failure behaviour
//!
//! Catalog refreshes fail open: a failed refresh keeps the previous
//! snapshot and is only logged. Detail fetches and pass-through queries
//! surface [`MimirError::UpstreamExhausted`] once retries run out.

pub mod cache;
pub mod config;
pub mod error;
pub mod gateway;
pub mod telemetry;
pub mod traits;
pub mod types;
pub mod upstream;

// Re-export main types at crate root
pub use cache::{CatalogStatus, DetailCacheConfig};
pub use config::Config;
pub use error::{MimirError, Result};
pub use gateway::{CachedGateway, Mimir, MimirBuilder, RefreshTask};
pub use traits::ProblemGateway;
pub use upstream::{ArticleOrder, ArticleQuery, QueryTransport, RetryConfig, SolutionId};

pub use types::{
    DetailRecord, Difficulty, Document, Operation, SolutionInfo, SummaryRecord, Tag, problem_url,
};
