//! Error types for the craft runner.
//!
//! Uses `thiserror` for typed errors covering startup (environment, craft
//! config, catalog files) and the request loop (stdin/stdout, JSON).

use artisan_craft::{CatalogError, ConfigError};

/// Errors that can occur during runner operation.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// An environment variable is missing or invalid.
    #[error("config error: {0}")]
    Config(String),

    /// The craft configuration file could not be loaded.
    #[error("craft config error: {0}")]
    CraftConfig(#[from] ConfigError),

    /// The item/block tables could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// The HTTP client for the bridge could not be built.
    #[error("bridge client error: {0}")]
    Bridge(String),

    /// Reading requests or writing reports failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
