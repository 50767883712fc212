//! Where a catalog view gets its snapshot from

use crate::client::WorksClient;
use crate::error::SourceError;
use async_trait::async_trait;
use works_repository::WorkRepository;
use works_store::{RecordStore, Work};

/// Provider of the full work collection
#[async_trait]
pub trait WorkSource: Send + Sync {
    /// Fetch every work, in stored order
    ///
    /// # Errors
    /// `SourceError` if the collection cannot be fetched
    async fn fetch_all(&self) -> Result<Vec<Work>, SourceError>;
}

#[async_trait]
impl<S: RecordStore> WorkSource for WorkRepository<S> {
    async fn fetch_all(&self) -> Result<Vec<Work>, SourceError> {
        Ok(self.list().await?)
    }
}

#[async_trait]
impl WorkSource for WorksClient {
    async fn fetch_all(&self) -> Result<Vec<Work>, SourceError> {
        Ok(self.list().await?)
    }
}
