//! Builder for configuring gateway instances

use std::sync::Arc;
use std::time::Duration;

use super::CachedGateway;
use crate::cache::{CatalogIndex, DEFAULT_TTL, DetailCache, DetailCacheConfig};
use crate::config::Config;
use crate::upstream::{HttpConfig, HttpTransport, QueryTransport, RemoteCaller, RetryConfig};
use crate::{MimirError, Result};

/// Main entry point for creating gateway instances.
pub struct Mimir;

impl Mimir {
    /// Create a new builder for configuring the gateway.
    pub fn builder() -> MimirBuilder {
        MimirBuilder::new()
    }
}

/// Builder for configuring gateway instances.
pub struct MimirBuilder {
    http: HttpConfig,
    transport: Option<Arc<dyn QueryTransport>>,
    retry: RetryConfig,
    ttl: Duration,
    detail_cache: DetailCacheConfig,
}

impl MimirBuilder {
    pub fn new() -> Self {
        Self {
            http: HttpConfig::default(),
            transport: None,
            retry: RetryConfig::default(),
            ttl: DEFAULT_TTL,
            detail_cache: DetailCacheConfig::default(),
        }
    }

    /// Start from a loaded configuration file.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .http_config(config.http_config())
            .retry(config.retry_config())
            .ttl(config.cache.ttl())
            .detail_cache(config.detail_cache_config())
    }

    /// Set the GraphQL endpoint URL.
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.http.endpoint = url.into();
        self
    }

    /// Replace all HTTP settings at once.
    pub fn http_config(mut self, config: HttpConfig) -> Self {
        self.http = config;
        self
    }

    /// Set the per-attempt request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.http.user_agent = Some(agent.into());
        self
    }

    /// Use a custom transport instead of HTTP. HTTP settings are then ignored.
    pub fn transport(mut self, transport: Arc<dyn QueryTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Set the retry policy (default: 3 attempts, 1s apart).
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Set the catalog time-to-live (default: one hour).
    ///
    /// A zero TTL refreshes the catalog on every request.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Set detail cache sizing (default: unbounded).
    pub fn detail_cache(mut self, config: DetailCacheConfig) -> Self {
        self.detail_cache = config;
        self
    }

    /// Build the gateway.
    pub fn build(self) -> Result<CachedGateway> {
        if self.retry.max_attempts == 0 {
            return Err(MimirError::InvalidInput(
                "retry max_attempts must be at least 1".into(),
            ));
        }
        if self.detail_cache.max_entries == Some(0) {
            return Err(MimirError::InvalidInput(
                "detail cache max_entries must be at least 1".into(),
            ));
        }

        let transport: Arc<dyn QueryTransport> = match self.transport {
            Some(transport) => transport,
            None => {
                if self.http.endpoint.is_empty() {
                    return Err(MimirError::Configuration("endpoint must not be empty".into()));
                }
                Arc::new(HttpTransport::with_config(&self.http)?)
            }
        };

        let caller = RemoteCaller::new(transport, self.retry);
        let catalog = CatalogIndex::new(caller.clone(), self.ttl);
        let details = DetailCache::new(&self.detail_cache);

        Ok(CachedGateway::new(caller, catalog, details))
    }
}

impl Default for MimirBuilder {
    fn default() -> Self {
        Self::new()
    }
}
