//! Error types for the auction dashboard

use thiserror::Error;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching, resolving, or rendering auctions
#[derive(Error, Debug)]
pub enum Error {
    /// Request could not be sent or its body could not be read
    #[error("Network error: {0}")]
    Network(String),

    /// Server answered with a non-success status
    #[error("Server returned status {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body was not in the expected shape
    #[error("Unexpected payload: {0}")]
    Payload(String),

    /// Name cache could not be read or written
    #[error("Name cache error: {0}")]
    Cache(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Failed to write rendered output
    #[error("Rendering failed: {0}")]
    Render(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Payload(err.to_string())
    }
}
