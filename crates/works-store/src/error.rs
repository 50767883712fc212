//! Error types for the record store
//!
//! Every failure here is server-side: unreadable, corrupt or unwritable
//! backing files. None of them are correctable by the caller.

use std::path::{Path, PathBuf};

/// Errors raised while loading or saving the work collection
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// IO error on the backing file or its temp sibling
    #[error("io error on {}: {source}", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Backing file does not hold a valid work array
    #[error("corrupt store file {}: {source}", path.display())]
    Corrupt {
        /// File being parsed
        path: PathBuf,
        /// Parse failure
        #[source]
        source: serde_json::Error,
    },

    /// Collection could not be serialized
    #[error("failed to serialize works: {0}")]
    Serialize(#[source] serde_json::Error),

    /// No id left above the current maximum
    #[error("id space exhausted (max id {max})")]
    IdExhausted {
        /// Highest id in the collection
        max: u64,
    },
}

impl StorageError {
    /// Create IO error for path
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create corrupt-content error for path
    pub fn corrupt(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
