//! Error types for the catalog

use works_repository::RepositoryError;

/// Errors from the HTTP works client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport or decoding failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("request failed with status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Server-provided `error` message, or the status reason
        message: String,
    },
}

impl ClientError {
    /// HTTP status of an API error
    #[inline]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
        }
    }
}

/// Errors while fetching a snapshot for the view
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// In-process repository failed
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Remote API failed
    #[error("client error: {0}")]
    Client(#[from] ClientError),
}
