//! Record store contract and id assignment

use crate::error::StorageError;
use crate::work::{Work, WorkId};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Durable owner of the full work collection
///
/// Implementations load and save the collection as a whole. They do not
/// coordinate concurrent writers themselves: callers that perform a
/// load-mutate-save cycle must hold [`RecordStore::write_lock`] for the
/// entire cycle.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load the full collection
    ///
    /// # Errors
    /// `StorageError` if the backing data is unreadable or corrupt
    async fn load_all(&self) -> Result<Vec<Work>, StorageError>;

    /// Replace the full collection
    ///
    /// Readers observe either the previous or the new collection, never a
    /// partial write.
    ///
    /// # Errors
    /// `StorageError` if the collection cannot be written
    async fn save_all(&self, works: &[Work]) -> Result<(), StorageError>;

    /// Mutex serializing writers of this store's backing resource
    fn write_lock(&self) -> Arc<Mutex<()>>;
}

/// Next id for a collection: `1` when empty, else `max(id) + 1`
///
/// # Errors
/// `StorageError::IdExhausted` when the maximum id is `u64::MAX`
pub fn next_id(works: &[Work]) -> Result<WorkId, StorageError> {
    match works.iter().map(|w| w.id.0).max() {
        None => Ok(WorkId(1)),
        Some(max) => max
            .checked_add(1)
            .map(WorkId)
            .ok_or(StorageError::IdExhausted { max }),
    }
}
