//! Tracing subscriber setup

use crate::error::ServerError;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// `RUST_LOG` wins over `default_filter` when set.
///
/// # Errors
/// `ServerError::Logging` if the filter is invalid or a subscriber is
/// already installed
pub fn init_tracing(default_filter: &str, json: bool) -> Result<(), ServerError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_filter)
            .map_err(|e| ServerError::Logging(format!("invalid filter '{default_filter}': {e}")))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| ServerError::Logging(e.to_string()))
}
