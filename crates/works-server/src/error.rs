//! Server errors and their HTTP rendering

use crate::config::ConfigError;
use serde::Serialize;
use std::net::SocketAddr;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::Reply;
use works_repository::RepositoryError;

/// Errors starting or running the server
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Listen address unavailable
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address
        addr: SocketAddr,
        /// Underlying error
        #[source]
        source: warp::Error,
    },

    /// Subscriber could not be installed
    #[error("logging setup failed: {0}")]
    Logging(String),
}

/// Operation being served, for generic failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `GET /works`, `GET /works/{id}`
    Load,
    /// `POST /works`
    Create,
    /// `PUT /works/{id}`
    Update,
    /// `DELETE /works/{id}`
    Delete,
}

impl Operation {
    /// Message returned on storage failure
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Load => "Failed to load works",
            Self::Create => "Failed to create work",
            Self::Update => "Failed to update work",
            Self::Delete => "Failed to delete work",
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// `{"error": message}` with `status`
pub(crate) fn json_error(status: StatusCode, message: &str) -> Response {
    warp::reply::with_status(warp::reply::json(&ErrorBody { error: message }), status)
        .into_response()
}

/// Render a repository error
///
/// Storage failures are logged and answered with a generic message.
pub(crate) fn error_reply(err: &RepositoryError, op: Operation) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    match err {
        RepositoryError::Validation { .. } => json_error(status, &err.to_string()),
        RepositoryError::NotFound { .. } => json_error(status, "Work not found"),
        RepositoryError::Storage(source) => {
            tracing::error!(operation = op.as_str(), error = %source, "storage failure");
            json_error(status, op.failure_message())
        }
    }
}
