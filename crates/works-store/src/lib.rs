//! Works Store
//!
//! Durable persistence of the portfolio work collection.
//!
//! # Core Concepts
//!
//! - [`Work`]: one portfolio entry, serialized with camelCase keys
//! - [`RecordStore`]: load/save contract over the full collection
//! - [`JsonFileStore`]: single pretty-printed JSON file, atomic replace-on-write
//! - [`MemoryStore`]: in-process backend
//! - [`next_id`]: `max(id) + 1`, or `1` for an empty collection
//!
//! # Example
//!
//! ```rust,ignore
//! use works_store::{JsonFileStore, RecordStore};
//!
//! let store = JsonFileStore::open("data/works.json");
//! let lock = store.write_lock();
//! let _guard = lock.lock().await;
//! let mut works = store.load_all().await?;
//! works.retain(|w| w.status != "Archived");
//! store.save_all(&works).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod file;
pub mod lock;
pub mod memory;
pub mod store;
pub mod work;

pub use error::StorageError;
pub use file::{JsonFileStore, WriteDurability};
pub use lock::write_lock_for;
pub use memory::MemoryStore;
pub use store::{next_id, RecordStore};
pub use work::{Work, WorkId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
