// Error types for govanity.
// Covers GitHub API faults, cache store faults, and configuration errors.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VanityError {
    #[error("GitHub API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid owner or repository name: {0:?}")]
    InvalidName(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cache store error: {0}")]
    Cache(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl VanityError {
    /// Whether this error came from the cache store rather than upstream.
    pub fn is_cache_fault(&self) -> bool {
        matches!(self, VanityError::Cache(_) | VanityError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, VanityError>;
