//! Work repository
//!
//! One call is one cycle against the store. Mutations hold the store's
//! write lock from load to save, so concurrent creates in one process get
//! unique sequential ids and no update is lost.

use crate::error::RepositoryError;
use crate::input::{NewWork, WorkPatch};
use works_store::{next_id, RecordStore, Work, WorkId};

/// Validated CRUD surface over a [`RecordStore`]
#[derive(Debug, Clone)]
pub struct WorkRepository<S> {
    store: S,
}

impl<S: RecordStore> WorkRepository<S> {
    /// Create repository over `store`
    #[inline]
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// All works, in stored order
    ///
    /// # Errors
    /// `RepositoryError::Storage` if the store cannot be read
    pub async fn list(&self) -> Result<Vec<Work>, RepositoryError> {
        Ok(self.store.load_all().await?)
    }

    /// Single work by id
    ///
    /// # Errors
    /// - `RepositoryError::NotFound` if no work has `id`
    /// - `RepositoryError::Storage` if the store cannot be read
    pub async fn get(&self, id: WorkId) -> Result<Work, RepositoryError> {
        self.store
            .load_all()
            .await?
            .into_iter()
            .find(|w| w.id == id)
            .ok_or(RepositoryError::not_found(id))
    }

    /// Create a work and assign it the next id
    ///
    /// # Errors
    /// - `RepositoryError::Validation` naming the first missing required field;
    ///   the store is not touched
    /// - `RepositoryError::Storage` on load/save failure
    pub async fn create(&self, input: NewWork) -> Result<Work, RepositoryError> {
        let draft = input.validate()?;

        let lock = self.store.write_lock();
        let _guard = lock.lock().await;

        let mut works = self.store.load_all().await?;
        let work = draft.with_id(next_id(&works)?);
        works.push(work.clone());
        self.store.save_all(&works).await?;

        tracing::info!(id = %work.id, title = %work.title, "created work");
        Ok(work)
    }

    /// Merge `patch` over the work with `id`
    ///
    /// # Errors
    /// - `RepositoryError::Validation` if the patch empties a required field
    /// - `RepositoryError::NotFound` if no work has `id`
    /// - `RepositoryError::Storage` on load/save failure
    pub async fn update(&self, id: WorkId, patch: WorkPatch) -> Result<Work, RepositoryError> {
        patch.validate()?;

        let lock = self.store.write_lock();
        let _guard = lock.lock().await;

        let mut works = self.store.load_all().await?;
        let work = works
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or(RepositoryError::not_found(id))?;
        patch.apply_to(work);
        let updated = work.clone();
        self.store.save_all(&works).await?;

        tracing::info!(id = %id, "updated work");
        Ok(updated)
    }

    /// Remove the work with `id`
    ///
    /// Deleting an id twice fails the second time.
    ///
    /// # Errors
    /// - `RepositoryError::NotFound` if no work has `id`
    /// - `RepositoryError::Storage` on load/save failure
    pub async fn delete(&self, id: WorkId) -> Result<(), RepositoryError> {
        let lock = self.store.write_lock();
        let _guard = lock.lock().await;

        let mut works = self.store.load_all().await?;
        let before = works.len();
        works.retain(|w| w.id != id);
        if works.len() == before {
            return Err(RepositoryError::not_found(id));
        }
        self.store.save_all(&works).await?;

        tracing::info!(id = %id, remaining = works.len(), "deleted work");
        Ok(())
    }
}
