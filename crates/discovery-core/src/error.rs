//! Error types for the Discovery link exporter
//!
//! Every fallible operation in the library returns [`DiscoveryError`].
//! A failed series is reported through this type and the caller moves on
//! to the next one.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for Discovery operations
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Request to {url} returned status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    /// Response body did not have the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Series reference was empty or whitespace-only
    #[error("Invalid series reference: {0:?}")]
    InvalidSeries(String),

    /// Reading or writing a local file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DiscoveryError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Discovery operations
pub type Result<T> = std::result::Result<T, DiscoveryError>;
