//! JSON file backend
//!
//! The whole collection lives in one pretty-printed JSON array. Writes go to
//! a uniquely named temp file in the same directory and are renamed over the
//! target, so a reader sees either the old or the new file.

use crate::error::StorageError;
use crate::lock::write_lock_for;
use crate::store::RecordStore;
use crate::work::Work;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

const EMPTY_COLLECTION: &[u8] = b"[]";

/// How hard a save tries to reach stable storage
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteDurability {
    /// Temp file + rename, no fsync
    #[default]
    BestEffort,
    /// Temp file + fsync + rename + directory fsync
    Durable,
}

/// Work collection persisted as a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    durability: WriteDurability,
    lock: Arc<Mutex<()>>,
}

impl JsonFileStore {
    /// Open store backed by `path`
    ///
    /// The file is not touched until the first load or save.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock = write_lock_for(&path);
        Self {
            path,
            durability: WriteDurability::default(),
            lock,
        }
    }

    /// With write durability
    #[inline]
    #[must_use]
    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    /// Backing file path
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Configured durability
    #[inline]
    #[must_use]
    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    /// Create the file holding an empty collection unless it already exists
    async fn initialize(&self) -> Result<(), StorageError> {
        let dir = self.parent_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::io(&dir, e))?;

        let created = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await;

        match created {
            Ok(mut file) => {
                file.write_all(EMPTY_COLLECTION)
                    .await
                    .map_err(|e| StorageError::io(&self.path, e))?;
                file.flush()
                    .await
                    .map_err(|e| StorageError::io(&self.path, e))?;
                tracing::info!(path = %self.path.display(), "initialized empty works file");
                Ok(())
            }
            // Another writer got there first
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }

    async fn write_atomic(&self, bytes: &[u8]) -> Result<(), StorageError> {
        let dir = self.parent_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::io(&dir, e))?;

        let file_name = self
            .path
            .file_name()
            .map_or_else(|| "works".into(), |n| n.to_string_lossy().into_owned());
        let tmp = dir.join(format!(".{file_name}.{}.tmp", uuid::Uuid::new_v4().simple()));

        let result = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.flush().await?;
            if self.durability == WriteDurability::Durable {
                file.sync_all().await?;
            }
            drop(file);
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = result {
            discard_temp(&tmp).await;
            return Err(StorageError::io(&self.path, e));
        }

        if self.durability == WriteDurability::Durable {
            sync_dir(&dir).await.map_err(|e| StorageError::io(&dir, e))?;
        }

        Ok(())
    }
}

/// Remove a temp file left by a failed write; a failure here is only logged
async fn discard_temp(tmp: &Path) -> bool {
    match tokio::fs::remove_file(tmp).await {
        Ok(()) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => true,
        Err(e) => {
            tracing::warn!(tmp = %tmp.display(), error = %e, "failed to remove temp file");
            false
        }
    }
}

#[cfg(unix)]
async fn sync_dir(dir: &Path) -> std::io::Result<()> {
    tokio::fs::File::open(dir).await?.sync_all().await
}

#[cfg(not(unix))]
async fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

/// Parse file content; blank content is an empty collection
pub(crate) fn parse_collection(path: &Path, text: &str) -> Result<Vec<Work>, StorageError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(|e| StorageError::corrupt(path, e))
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<Work>, StorageError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => {
                let works = parse_collection(&self.path, &text)?;
                tracing::debug!(path = %self.path.display(), count = works.len(), "loaded works");
                Ok(works)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.initialize().await?;
                Ok(Vec::new())
            }
            Err(e) => Err(StorageError::io(&self.path, e)),
        }
    }

    async fn save_all(&self, works: &[Work]) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(works).map_err(StorageError::Serialize)?;
        self.write_atomic(&bytes).await?;
        tracing::debug!(path = %self.path.display(), count = works.len(), "saved works");
        Ok(())
    }

    fn write_lock(&self) -> Arc<Mutex<()>> {
        Arc::clone(&self.lock)
    }
}
