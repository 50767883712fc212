//! Error types for the repository
//!
//! Validation and not-found failures are detected before any write. Storage
//! failures are never swallowed and always reach the caller.

use works_store::{StorageError, WorkId};

/// Repository operation errors
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Required field missing or empty
    #[error("Missing field: {field}")]
    Validation {
        /// First offending field, in fixed check order
        field: &'static str,
    },

    /// No work with this id
    #[error("work {id} not found")]
    NotFound {
        /// Requested id
        id: WorkId,
    },

    /// Backing store failed
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RepositoryError {
    /// Create validation error
    #[inline]
    #[must_use]
    pub fn validation(field: &'static str) -> Self {
        Self::Validation { field }
    }

    /// Create not-found error
    #[inline]
    #[must_use]
    pub fn not_found(id: WorkId) -> Self {
        Self::NotFound { id }
    }

    /// Check if the caller can correct this error
    #[inline]
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }

    /// HTTP status this error maps to
    #[inline]
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation { .. } => 400,
            Self::NotFound { .. } => 404,
            Self::Storage(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_field() {
        let err = RepositoryError::validation("title");
        assert_eq!(err.to_string(), "Missing field: title");
        assert_eq!(err.status_code(), 400);
        assert!(err.is_client_error());
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = RepositoryError::not_found(WorkId(9));
        assert_eq!(err.status_code(), 404);
        assert!(err.to_string().contains('9'));
    }

    #[test]
    fn storage_is_server_error() {
        let err: RepositoryError = StorageError::IdExhausted { max: u64::MAX }.into();
        assert_eq!(err.status_code(), 500);
        assert!(!err.is_client_error());
    }
}
