//! Error types for the playback core

/// Result type alias for playback operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the playback core
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The playback engine reported a failure
    #[error("Playback engine failure: {0}")]
    Engine(String),

    /// Now-playing metadata error
    #[error("Metadata error: {0}")]
    Metadata(#[from] radiometa::Error),

    /// The playback worker task has stopped
    #[error("Playback worker is not running")]
    WorkerStopped,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an engine error from a string
    pub fn engine(msg: impl Into<String>) -> Self {
        Self::Engine(msg.into())
    }

    /// Create a generic error from a string
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
