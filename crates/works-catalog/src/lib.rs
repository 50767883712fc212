//! Works Catalog
//!
//! Client-side, filterable projection over a fetched snapshot of works.
//!
//! # Core Concepts
//!
//! - [`FilterCriteria`]: search term, category and year dropdowns
//! - [`apply_filter`]: pure, order-preserving filter
//! - [`CatalogView`]: snapshot + criteria + visible projection
//! - [`WorkSource`]: where snapshots come from (repository or HTTP)
//! - [`WorksClient`]: HTTP client for the `/works` API
//!
//! # Example
//!
//! ```rust,ignore
//! use works_catalog::{CatalogView, WorksClient};
//!
//! let client = WorksClient::new("http://127.0.0.1:3000");
//! let mut view = CatalogView::new();
//! let _ = view.refresh(&client).await;
//!
//! view.set_category("Commercial");
//! view.set_year("2024");
//! println!("{}", view.summary());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod client;
pub mod criteria;
pub mod error;
pub mod filter;
pub mod source;
pub mod view;

pub use client::WorksClient;
pub use criteria::{FilterCriteria, SearchScope, Selection, ALL};
pub use error::{ClientError, SourceError};
pub use filter::{apply_filter, derived_year, matches};
pub use source::WorkSource;
pub use view::{CatalogView, FilterSummary};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
