//! Error types for the tracker core.
//!
//! [`TrackerError`] is the top-level error shared by transports, stores and the checker.

use thiserror::Error;

/// Top-level error (network, remote API, oversize publish, vanished edit target, config, storage, feed, IO).
#[derive(Error, Debug)]
pub enum TrackerError {
    /// Timeouts, connection failures, rate limits and non-2xx responses. Retryable.
    #[error("Network error: {0}")]
    Network(String),

    /// The remote API rejected the request for a reason retrying will not fix.
    #[error("API error: {0}")]
    Api(String),

    /// The long-form host refused the page because it is too big.
    #[error("Content too large")]
    ContentTooLarge,

    /// The message to edit no longer exists on the remote platform.
    #[error("Edit target gone: {0}")]
    EditTargetGone(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// Upstream release data could not be parsed.
    #[error("Feed error: {0}")]
    Feed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TrackerError {
    /// True for failures a retry policy may attempt again.
    pub fn is_transient(&self) -> bool {
        matches!(self, TrackerError::Network(_))
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(e: serde_json::Error) -> Self {
        TrackerError::Storage(e.to_string())
    }
}

/// Result type for core operations; uses [`TrackerError`].
pub type Result<T> = std::result::Result<T, TrackerError>;
