//! Transport trait for the upstream query API.
//!
//! A [`QueryTransport`] performs exactly one attempt of one operation. Retry
//! policy is layered on top by [`RemoteCaller`](super::RemoteCaller), so
//! transports stay stateless and easy to mock.
//!
//! # Success semantics
//!
//! A transport returns `Ok(Document)` only when the request completed and the
//! upstream answered with a success status and a parseable body. A body
//! carrying an `errors` list is still `Ok`; see
//! [`Document::has_errors()`](crate::types::Document::has_errors).
//! Network failures, non-success statuses, and unreadable bodies are reported
//! as transient errors ([`MimirError::is_transient()`](crate::MimirError::is_transient)).

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;
use crate::types::{Document, Operation};

/// Executes a single remote query with the given variables.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// Transport name for logging/debugging.
    fn name(&self) -> &str;

    /// Perform one attempt of `operation` with `variables`.
    async fn execute(&self, operation: &Operation, variables: &Value) -> Result<Document>;
}
