//! Works Repository
//!
//! Validated list/get/create/update/delete over a [`works_store::RecordStore`].
//!
//! # Core Concepts
//!
//! - [`WorkRepository`]: one call = lock + load + mutate + save
//! - [`NewWork`]: create payload, required fields checked in fixed order
//! - [`WorkPatch`]: allow-listed partial update; `id` can never be patched
//! - [`RepositoryError`]: validation (400), not found (404), storage (500)
//!
//! # Example
//!
//! ```rust,ignore
//! use works_repository::{NewWork, WorkPatch, WorkRepository};
//! use works_store::JsonFileStore;
//!
//! let repo = WorkRepository::new(JsonFileStore::open("data/works.json"));
//! let work = repo
//!     .create(NewWork::new("Nike Air Max", "Nike", "Launch spot", "Commercial", "Completed"))
//!     .await?;
//! repo.update(work.id, WorkPatch::new().status("Archived")).await?;
//! repo.delete(work.id).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod input;
mod lenient;
pub mod repository;

pub use error::RepositoryError;
pub use input::{NewWork, WorkDraft, WorkPatch, REQUIRED_FIELDS};
pub use repository::WorkRepository;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
