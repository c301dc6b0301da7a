//! Configuration loading.
//!
//! Configuration is loaded from TOML files with the following resolution order:
//! 1. `--config <path>` (CLI flag; must exist)
//! 2. `~/.mimir/config.toml` (user)
//! 3. `/etc/mimir/config.toml` (system)
//!
//! When no file is found the built-in defaults apply. Every field is optional.
//!
//! ```toml
//! [upstream]
//! endpoint = "https://leetcode.com/graphql"
//! request_timeout_secs = 30
//!
//! [retry]
//! max_attempts = 3
//! delay_ms = 1000
//!
//! [cache]
//! ttl_secs = 3600
//! detail_max_entries = 10000
//! refresh_interval_secs = 600
//! ```

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cache::{DEFAULT_TTL, DetailCacheConfig};
use crate::upstream::http::DEFAULT_REQUEST_TIMEOUT;
use crate::upstream::{DEFAULT_ENDPOINT, HttpConfig, RetryConfig};
use crate::{MimirError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub retry: RetrySection,
    #[serde(default)]
    pub cache: CacheSection,
}

/// Upstream endpoint settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpstreamConfig {
    /// GraphQL endpoint (default: https://leetcode.com/graphql).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Per-attempt request timeout in seconds (default: 30).
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout(),
            user_agent: None,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT.as_secs()
}

/// Retry policy for upstream calls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RetrySection {
    /// Attempts per call, including the first (default: 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed pause between attempts in milliseconds (default: 1000).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetrySection {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    1000
}

/// Catalog and detail cache settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CacheSection {
    /// Catalog snapshot TTL in seconds (default: 3600). Zero means always stale.
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,
    /// Upper bound on cached detail records. Unbounded when absent.
    #[serde(default)]
    pub detail_max_entries: Option<u64>,
    /// Period of the background refresher in seconds. No refresher when absent.
    #[serde(default)]
    pub refresh_interval_secs: Option<u64>,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            detail_max_entries: None,
            refresh_interval_secs: None,
        }
    }
}

fn default_ttl() -> u64 {
    DEFAULT_TTL.as_secs()
}

impl CacheSection {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    pub fn refresh_interval(&self) -> Option<Duration> {
        self.refresh_interval_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Load configuration from the standard locations.
    ///
    /// An explicit path that does not exist is an error; otherwise a missing
    /// file means defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        match Self::resolve_config_path(explicit_path)? {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Parse a specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            MimirError::Configuration(format!("Failed to read config file {path:?}: {e}"))
        })?;
        toml::from_str(&content).map_err(|e| {
            MimirError::Configuration(format!("Failed to parse config file {path:?}: {e}"))
        })
    }

    fn resolve_config_path(explicit: Option<&Path>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit {
            if path.exists() {
                return Ok(Some(path.to_path_buf()));
            }
            return Err(MimirError::Configuration(format!(
                "Config file not found: {path:?}"
            )));
        }

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(".mimir").join("config.toml");
            if user_config.exists() {
                return Ok(Some(user_config));
            }
        }

        let system_config = PathBuf::from("/etc/mimir/config.toml");
        if system_config.exists() {
            return Ok(Some(system_config));
        }

        Ok(None)
    }

    pub fn http_config(&self) -> HttpConfig {
        let mut config = HttpConfig::new()
            .endpoint(self.upstream.endpoint.clone())
            .timeout(Duration::from_secs(self.upstream.request_timeout_secs));
        if let Some(ref agent) = self.upstream.user_agent {
            config = config.user_agent(agent.clone());
        }
        config
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new()
            .max_attempts(self.retry.max_attempts)
            .delay(Duration::from_millis(self.retry.delay_ms))
    }

    pub fn detail_cache_config(&self) -> DetailCacheConfig {
        DetailCacheConfig {
            max_entries: self.cache.detail_max_entries,
        }
    }
}
