//! Error types for the metadata client

/// Result type alias for metadata operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when fetching now-playing metadata
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Builder was not given a metadata URL
    #[error("No metadata URL configured")]
    MissingUrl,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
