//! Server configuration
//!
//! Layered, lowest precedence first: defaults, TOML file, `WORKS_*`
//! environment variables, command-line flags.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use works_store::WriteDurability;

/// Environment variable for the listen address
pub const ENV_BIND: &str = "WORKS_BIND";
/// Environment variable for the data file
pub const ENV_DATA_PATH: &str = "WORKS_DATA_PATH";
/// Environment variable for write durability (`best_effort` | `durable`)
pub const ENV_DURABILITY: &str = "WORKS_DURABILITY";
/// Environment variable for the log filter directive
pub const ENV_LOG: &str = "WORKS_LOG";
/// Environment variable enabling JSON logs
pub const ENV_LOG_JSON: &str = "WORKS_LOG_JSON";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file unreadable
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        /// Config file
        path: PathBuf,
        /// Parse failure
        #[source]
        source: toml::de::Error,
    },

    /// Environment variable holds an unusable value
    #[error("invalid value for {key}: '{value}'")]
    InvalidEnv {
        /// Variable name
        key: &'static str,
        /// Offending value
        value: String,
    },
}

/// Works server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address
    pub bind: SocketAddr,
    /// JSON file holding the works collection
    pub data_path: PathBuf,
    /// Save durability
    pub durability: WriteDurability,
    /// `tracing` filter directive, overridden by `RUST_LOG`
    pub log_filter: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl ServerConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With listen address
    #[inline]
    #[must_use]
    pub fn with_bind(mut self, bind: SocketAddr) -> Self {
        self.bind = bind;
        self
    }

    /// With data file
    #[inline]
    #[must_use]
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// With save durability
    #[inline]
    #[must_use]
    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    /// With log filter directive
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// With JSON logging
    #[inline]
    #[must_use]
    pub fn with_log_json(mut self, json: bool) -> Self {
        self.log_json = json;
        self
    }

    /// Parse configuration from TOML text; missing keys keep their defaults
    ///
    /// # Errors
    /// `ConfigError::Parse` on invalid TOML or unknown keys
    pub fn from_toml_str(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// `ConfigError::Read` or `ConfigError::Parse`
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(path, &text)
    }

    /// Overlay `WORKS_*` variables from the process environment
    ///
    /// # Errors
    /// `ConfigError::InvalidEnv` on an unparsable value
    pub fn apply_env(self) -> Result<Self, ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay `WORKS_*` variables read through `lookup`
    ///
    /// # Errors
    /// `ConfigError::InvalidEnv` on an unparsable value
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_BIND) {
            self.bind = value.parse().map_err(|_| ConfigError::InvalidEnv {
                key: ENV_BIND,
                value,
            })?;
        }
        if let Some(value) = lookup(ENV_DATA_PATH) {
            self.data_path = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_DURABILITY) {
            self.durability = match value.as_str() {
                "best_effort" => WriteDurability::BestEffort,
                "durable" => WriteDurability::Durable,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: ENV_DURABILITY,
                        value,
                    })
                }
            };
        }
        if let Some(value) = lookup(ENV_LOG) {
            self.log_filter = value;
        }
        if let Some(value) = lookup(ENV_LOG_JSON) {
            self.log_json = match value.as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: ENV_LOG_JSON,
                        value,
                    })
                }
            };
        }
        Ok(self)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_path: PathBuf::from("data/works.json"),
            durability: WriteDurability::BestEffort,
            log_filter: "info".to_string(),
            log_json: false,
        }
    }
}
