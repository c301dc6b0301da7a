//! HTTP transport for the LeetCode GraphQL endpoint.
//!
//! One [`HttpTransport`] owns one `reqwest::Client`, and therefore one
//! connection pool. Build it once and share it (it is cheap to clone).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::debug;

use super::traits::QueryTransport;
use crate::types::{Document, Operation, QueryRequest};
use crate::{MimirError, Result};

/// Default upstream GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://leetcode.com/graphql";

/// Default per-attempt request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum number of bytes of an error body kept in [`MimirError::Api`].
const MAX_ERROR_BODY: usize = 512;

/// Settings for [`HttpTransport`].
///
/// ```rust
/// # use mimir::upstream::HttpConfig;
/// # use std::time::Duration;
/// let config = HttpConfig::new()
///     .endpoint("http://localhost:8080/graphql")
///     .timeout(Duration::from_secs(5));
/// assert_eq!(config.endpoint, "http://localhost:8080/graphql");
/// ```
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// GraphQL endpoint URL. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,
    /// Per-attempt timeout. Default: 30s.
    pub timeout: Duration,
    /// Optional `User-Agent` header value.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_REQUEST_TIMEOUT,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the GraphQL endpoint URL.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Set the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the `User-Agent` header.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }
}

/// [`QueryTransport`] that POSTs GraphQL requests over HTTP(S).
#[derive(Clone)]
pub struct HttpTransport {
    http: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Create a transport for the default endpoint.
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    /// Create a transport from explicit settings (e.g. a wiremock URL in tests).
    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.timeout);
        if let Some(ref agent) = config.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        let http = builder.build().map_err(|e| {
            MimirError::Configuration(format!("failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The endpoint this transport posts to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QueryTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn execute(&self, operation: &Operation, variables: &Value) -> Result<Document> {
        debug!(operation = operation.name, endpoint = %self.endpoint, "posting query");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&QueryRequest::new(operation, variables))
            .send()
            .await
            .map_err(|e| MimirError::Http(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let mut message = response.text().await.unwrap_or_default();
            if message.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !message.is_char_boundary(cut) {
                    cut -= 1;
                }
                message.truncate(cut);
            }
            return Err(MimirError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| MimirError::Http(format!("failed to read response body: {e}")))?;

        serde_json::from_slice(&body)
            .map_err(|e| MimirError::Http(format!("invalid response body: {e}")))
    }
}
