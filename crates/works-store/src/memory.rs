//! In-process backend for tests and demos

use crate::error::StorageError;
use crate::store::RecordStore;
use crate::work::Work;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Work collection held in memory
///
/// Clones share the same collection and write lock.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    works: Arc<RwLock<Vec<Work>>>,
    lock: Arc<Mutex<()>>,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create store seeded with `works`
    #[must_use]
    pub fn with_works(works: Vec<Work>) -> Self {
        Self {
            works: Arc::new(RwLock::new(works)),
            lock: Arc::default(),
        }
    }

    /// Current collection
    #[must_use]
    pub fn snapshot(&self) -> Vec<Work> {
        self.works.read().clone()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load_all(&self) -> Result<Vec<Work>, StorageError> {
        Ok(self.snapshot())
    }

    async fn save_all(&self, works: &[Work]) -> Result<(), StorageError> {
        *self.works.write() = works.to_vec();
        Ok(())
    }

    fn write_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.lock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::work::WorkId;

    #[tokio::test]
    async fn clones_share_collection() {
        let store = MemoryStore::new();
        let other = store.clone();

        store
            .save_all(&[Work::new(WorkId(1), "A", "B", "C", "D", "E")])
            .await
            .unwrap();

        assert_eq!(other.load_all().await.unwrap().len(), 1);
        assert!(Arc::ptr_eq(&store.write_lock(), &other.write_lock()));
    }
}
