//! Mimir error types

/// Mimir error types
#[derive(Debug, thiserror::Error)]
pub enum MimirError {
    // Transport errors (a single attempt against the upstream)
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Every attempt allowed by the retry policy failed.
    #[error("upstream exhausted after {attempts} attempts ({operation}): {last_error}")]
    UpstreamExhausted {
        operation: String,
        attempts: u32,
        last_error: String,
    },

    // Lookup errors
    #[error("not found: {0}")]
    NotFound(String),

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),
}

impl MimirError {
    /// Whether this error is a failed transport attempt that may succeed on retry.
    pub fn is_transient(&self) -> bool {
        matches!(self, MimirError::Http(_) | MimirError::Api { .. })
    }

    /// Whether this error means the requested record does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, MimirError::NotFound(_))
    }
}

impl From<reqwest::Error> for MimirError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => MimirError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => MimirError::Http(err.to_string()),
        }
    }
}

/// Result type alias for Mimir operations
pub type Result<T> = std::result::Result<T, MimirError>;
