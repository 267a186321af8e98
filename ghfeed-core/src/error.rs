//! Error types for ghfeed.

use thiserror::Error;

/// Errors that can occur while talking to the event source or handling saved items.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("GitHub user not found: {0}")]
    UserNotFound(String),

    #[error("GitHub responded with status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("GitHub request failed: {0}")]
    Upstream(String),

    #[error("GitHub request timed out after {0}s")]
    Timeout(u64),

    #[error("Unexpected response shape: {0}")]
    Decode(String),

    #[error("Invalid activity data")]
    InvalidActivity,

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for ghfeed operations.
pub type FeedResult<T> = Result<T, FeedError>;
