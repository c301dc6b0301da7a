//! Upstream access: transport, retry, and query documents.

pub mod http;
pub mod queries;
pub mod retry;
pub mod traits;
pub(crate) mod wire;

pub use http::{DEFAULT_ENDPOINT, HttpConfig, HttpTransport};
pub use queries::{ArticleOrder, ArticleQuery, SolutionId};
pub use retry::{RemoteCaller, RetryConfig};
pub use traits::QueryTransport;
