//! Works Server
//!
//! HTTP JSON API over the works repository.
//!
//! # Core Concepts
//!
//! - [`routes`]: warp filter serving `/works` for any [`RecordStore`]
//! - [`ServerConfig`]: defaults, TOML, `WORKS_*` env, CLI flags
//! - [`serve`]: bind, log and run until the shutdown future resolves
//!
//! # Example
//!
//! ```rust,ignore
//! use works_server::{serve, ServerConfig};
//!
//! let config = ServerConfig::new().apply_env()?;
//! serve(&config, async {
//!     let _ = tokio::signal::ctrl_c().await;
//! })
//! .await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod config;
pub mod error;
mod handlers;
pub mod logging;
pub mod routes;

pub use config::{ConfigError, ServerConfig};
pub use error::{Operation, ServerError};
pub use logging::init_tracing;
pub use routes::{api, routes, MAX_BODY_BYTES};

use std::future::Future;
use works_repository::WorkRepository;
use works_store::{JsonFileStore, RecordStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Repository over the configured data file
#[must_use]
pub fn repository(config: &ServerConfig) -> WorkRepository<JsonFileStore> {
    WorkRepository::new(JsonFileStore::open(&config.data_path).with_durability(config.durability))
}

/// Serve the API until `shutdown` resolves
///
/// An unreadable data file at startup is logged, not fatal; requests
/// will report it until it is fixed.
///
/// # Errors
/// `ServerError::Bind` if the listen address is unavailable
pub async fn serve<F>(config: &ServerConfig, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let repo = repository(config);

    match repo.store().load_all().await {
        Ok(works) => tracing::info!(
            path = %config.data_path.display(),
            count = works.len(),
            "works loaded"
        ),
        Err(e) => tracing::warn!(
            path = %config.data_path.display(),
            error = %e,
            "works file unreadable at startup"
        ),
    }

    let (addr, server) = warp::serve(routes(repo))
        .try_bind_with_graceful_shutdown(config.bind, shutdown)
        .map_err(|source| ServerError::Bind {
            addr: config.bind,
            source,
        })?;

    tracing::info!(%addr, version = VERSION, "works server listening");
    server.await;
    tracing::info!("works server stopped");
    Ok(())
}
