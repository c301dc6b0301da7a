//! Retry configuration and the retrying [`RemoteCaller`].
//!
//! Every upstream consultation goes through [`RemoteCaller::execute()`],
//! which wraps a [`QueryTransport`] with a bounded number of attempts and a
//! fixed pause between failed attempts. There is no backoff and no jitter:
//! the delay between attempts is always [`RetryConfig::delay`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::warn;

use super::traits::QueryTransport;
use crate::telemetry;
use crate::types::{Document, Operation};
use crate::{MimirError, Result};

/// Configuration for retrying upstream calls.
///
/// ```rust
/// # use mimir::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_attempts(5)
///     .delay(Duration::from_millis(200));
/// assert_eq!(config.max_attempts, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first). Default: 3.
    /// Values below 1 are treated as 1.
    pub max_attempts: u32,
    /// Fixed pause between failed attempts. Default: 1s.
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// A config that performs a single attempt.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Set maximum attempts (including the first).
    pub fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    /// Set the fixed pause between failed attempts.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Worst-case time spent sleeping in one exhausted retry loop.
    pub fn total_delay(&self) -> Duration {
        self.delay
            .saturating_mul(self.max_attempts.max(1).saturating_sub(1))
    }
}

/// Run `f` until it succeeds, returns a permanent error, or attempts run out.
///
/// Transient errors ([`MimirError::is_transient()`]) are retried after
/// `config.delay`; anything else is returned immediately. Exhaustion is
/// reported as [`MimirError::UpstreamExhausted`].
pub(crate) async fn with_retry<F, Fut, T>(config: &RetryConfig, operation: &str, f: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = config.max_attempts.max(1);
    let mut last_err = None;

    for attempt in 0..max_attempts {
        match f().await {
            Ok(result) => {
                metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
                    "operation" => operation.to_owned(),
                    "status" => "ok",
                )
                .increment(1);
                return Ok(result);
            }
            Err(e) if e.is_transient() => {
                metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
                    "operation" => operation.to_owned(),
                    "status" => "error",
                )
                .increment(1);
                metrics::counter!(telemetry::UPSTREAM_RETRIES_TOTAL,
                    "operation" => operation.to_owned(),
                )
                .increment(1);
                warn!(
                    operation,
                    attempt = attempt + 1,
                    max_attempts,
                    delay_ms = config.delay.as_millis() as u64,
                    error = %e,
                    "upstream attempt failed"
                );
                if attempt + 1 < max_attempts {
                    tokio::time::sleep(config.delay).await;
                }
                last_err = Some(e);
            }
            Err(e) => {
                metrics::counter!(telemetry::UPSTREAM_REQUESTS_TOTAL,
                    "operation" => operation.to_owned(),
                    "status" => "error",
                )
                .increment(1);
                return Err(e);
            }
        }
    }

    Err(MimirError::UpstreamExhausted {
        operation: operation.to_owned(),
        attempts: max_attempts,
        last_error: last_err.map(|e| e.to_string()).unwrap_or_default(),
    })
}

/// Executes upstream operations with bounded, fixed-delay retry.
///
/// Holds no state beyond its transport and configuration; clone freely.
#[derive(Clone)]
pub struct RemoteCaller {
    transport: Arc<dyn QueryTransport>,
    config: RetryConfig,
}

impl RemoteCaller {
    /// Wrap a transport with retry logic.
    pub fn new(transport: Arc<dyn QueryTransport>, config: RetryConfig) -> Self {
        Self { transport, config }
    }

    /// The retry policy in use.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Name of the wrapped transport.
    pub fn transport_name(&self) -> &str {
        self.transport.name()
    }

    /// Execute `operation` with `variables`, retrying transport failures.
    pub async fn execute(&self, operation: &Operation, variables: Value) -> Result<Document> {
        with_retry(&self.config, operation.name, || {
            self.transport.execute(operation, &variables)
        })
        .await
    }
}
