//! Configuration for the craft action.
//!
//! [`CraftConfig`] bundles every tunable of the action so that callers
//! (the runner, tests) can override defaults. The runner reads it from a
//! YAML document; every field has a default, so an empty document is valid.
//!
//! ```yaml
//! search_radius: 32
//! station_block: crafting_table
//! station_policy: allow_stationless
//! max_failures_per_item: 10
//! navigation_timeout_ms: 30000
//! ```

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Default radius, in blocks, of the crafting-station search.
pub const DEFAULT_SEARCH_RADIUS: u32 = 32;

/// Default block name of the crafting station.
pub const DEFAULT_STATION_BLOCK: &str = "crafting_table";

/// Default number of failures an item may accumulate in one session.
pub const DEFAULT_MAX_FAILURES_PER_ITEM: u32 = 10;

/// Batch multiplier passed to the recipe service.
pub const RECIPE_BATCH: u32 = 1;

/// Errors that can occur when loading craft configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is out of range.
    #[error("invalid config value: {0}")]
    Invalid(String),
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// What to do when no crafting station is within range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StationPolicy {
    /// Continue without a station; only recipes that fit the inventory
    /// grid are eligible.
    #[default]
    AllowStationless,
    /// Fail with `NoStationFound` before querying any recipe.
    RequireStation,
}

/// Tunables for the craft action.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CraftConfig {
    /// Maximum distance, in blocks, of the crafting-station search.
    #[serde(default = "default_search_radius")]
    pub search_radius: u32,

    /// Block name of the crafting station.
    #[serde(default = "default_station_block")]
    pub station_block: String,

    /// Behavior when no station is found.
    #[serde(default)]
    pub station_policy: StationPolicy,

    /// Failures an item may accumulate in one session before further
    /// requests for it are refused.
    #[serde(default = "default_max_failures_per_item")]
    pub max_failures_per_item: u32,

    /// Deadline for reaching the station. `None` waits indefinitely.
    #[serde(default)]
    pub navigation_timeout_ms: Option<u64>,

    /// Deadline for the craft call. `None` waits indefinitely.
    #[serde(default)]
    pub craft_timeout_ms: Option<u64>,
}

impl Default for CraftConfig {
    fn default() -> Self {
        Self {
            search_radius: DEFAULT_SEARCH_RADIUS,
            station_block: default_station_block(),
            station_policy: StationPolicy::default(),
            max_failures_per_item: DEFAULT_MAX_FAILURES_PER_ITEM,
            navigation_timeout_ms: None,
            craft_timeout_ms: None,
        }
    }
}

impl CraftConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`]/[`ConfigError::Invalid`] if the content is
    /// not a valid configuration.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.search_radius == 0 {
            return Err(ConfigError::Invalid(String::from(
                "search_radius must be at least 1",
            )));
        }
        if self.station_block.trim().is_empty() {
            return Err(ConfigError::Invalid(String::from(
                "station_block must not be empty",
            )));
        }
        if self.max_failures_per_item == 0 {
            return Err(ConfigError::Invalid(String::from(
                "max_failures_per_item must be at least 1",
            )));
        }
        Ok(())
    }

    /// Navigation deadline as a [`Duration`].
    pub fn navigation_timeout(&self) -> Option<Duration> {
        self.navigation_timeout_ms.map(Duration::from_millis)
    }

    /// Craft deadline as a [`Duration`].
    pub fn craft_timeout(&self) -> Option<Duration> {
        self.craft_timeout_ms.map(Duration::from_millis)
    }
}

const fn default_search_radius() -> u32 {
    DEFAULT_SEARCH_RADIUS
}

fn default_station_block() -> String {
    String::from(DEFAULT_STATION_BLOCK)
}

const fn default_max_failures_per_item() -> u32 {
    DEFAULT_MAX_FAILURES_PER_ITEM
}
