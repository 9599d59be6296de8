//! Configuration types for the craft runner.
//!
//! Runner settings come from environment variables. The craft action's own
//! tunables live in an optional YAML file (`CRAFT_CONFIG`), and the item and
//! block tables in an optional data directory (`CATALOG_DIR`).

use std::path::PathBuf;
use std::time::Duration;

use artisan_craft::{Catalog, CraftConfig};

use crate::error::RunnerError;

/// Complete runner configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// How to reach the bot bridge.
    pub bridge: BridgeConfig,
    /// Path to a YAML craft config; defaults apply when unset.
    pub craft_config_path: Option<PathBuf>,
    /// Directory holding `items.json` and `blocks.json`; the built-in
    /// tables apply when unset.
    pub catalog_dir: Option<PathBuf>,
}

/// Connection settings for the bot bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Base URL of the bridge server (e.g. `http://127.0.0.1:3000`).
    pub url: String,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Attempts per request before giving up (at least one).
    pub max_retries: u32,
    /// Base delay between attempts; doubles after each failure.
    pub backoff: Duration,
}

impl RunnerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional variables:
    /// - `BRIDGE_URL` -- bridge base URL (default `http://127.0.0.1:3000`)
    /// - `REQUEST_TIMEOUT_MS` -- per-request timeout (default 600000)
    /// - `MAX_RETRIES` -- attempts per bridge request (default 3)
    /// - `BACKOFF_MS` -- base retry delay in milliseconds (default 1000)
    /// - `CRAFT_CONFIG` -- path to the craft config YAML
    /// - `CATALOG_DIR` -- directory with `items.json` and `blocks.json`
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunnerError> {
        let url = lookup("BRIDGE_URL").unwrap_or_else(|| "http://127.0.0.1:3000".to_owned());
        let url = url.trim_end_matches('/').to_owned();
        if url.is_empty() {
            return Err(RunnerError::Config(String::from("BRIDGE_URL must not be empty")));
        }

        let request_timeout_ms: u64 = parse_var(&lookup, "REQUEST_TIMEOUT_MS", "600000")?;
        let max_retries: u32 = parse_var(&lookup, "MAX_RETRIES", "3")?;
        let backoff_ms: u64 = parse_var(&lookup, "BACKOFF_MS", "1000")?;

        if max_retries == 0 {
            return Err(RunnerError::Config(String::from(
                "MAX_RETRIES must be at least 1",
            )));
        }

        Ok(Self {
            bridge: BridgeConfig {
                url,
                request_timeout: Duration::from_millis(request_timeout_ms),
                max_retries,
                backoff: Duration::from_millis(backoff_ms),
            },
            craft_config_path: lookup("CRAFT_CONFIG").map(PathBuf::from),
            catalog_dir: lookup("CATALOG_DIR").map(PathBuf::from),
        })
    }

    /// Load the craft config, or the defaults if no path is set.
    pub fn load_craft_config(&self) -> Result<CraftConfig, RunnerError> {
        match &self.craft_config_path {
            Some(path) => Ok(CraftConfig::from_file(path)?),
            None => Ok(CraftConfig::default()),
        }
    }

    /// Load the item and block tables, or the built-in tables.
    pub fn load_catalog(&self) -> Result<Catalog, RunnerError> {
        match &self.catalog_dir {
            Some(dir) => Ok(Catalog::from_dir(dir)?),
            None => Ok(Catalog::builtin()),
        }
    }
}

/// Parse an optional variable, falling back to `default`.
fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: &str,
) -> Result<T, RunnerError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .unwrap_or_else(|| default.to_owned())
        .trim()
        .parse()
        .map_err(|e| RunnerError::Config(format!("invalid {name}: {e}")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: BTreeMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = RunnerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.bridge.url, "http://127.0.0.1:3000");
        assert_eq!(config.bridge.request_timeout, Duration::from_secs(600));
        assert_eq!(config.bridge.max_retries, 3);
        assert_eq!(config.bridge.backoff, Duration::from_secs(1));
        assert!(config.craft_config_path.is_none());
        assert!(config.catalog_dir.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = RunnerConfig::from_lookup(lookup_from(&[
            ("BRIDGE_URL", "http://bridge:4000/"),
            ("MAX_RETRIES", "5"),
            ("BACKOFF_MS", "250"),
            ("CRAFT_CONFIG", "/etc/artisan/craft.yaml"),
        ]))
        .unwrap();
        assert_eq!(config.bridge.url, "http://bridge:4000");
        assert_eq!(config.bridge.max_retries, 5);
        assert_eq!(config.bridge.backoff, Duration::from_millis(250));
        assert_eq!(
            config.craft_config_path,
            Some(PathBuf::from("/etc/artisan/craft.yaml"))
        );
    }

    #[test]
    fn invalid_numbers_rejected() {
        let result = RunnerConfig::from_lookup(lookup_from(&[("MAX_RETRIES", "many")]));
        assert!(matches!(result, Err(RunnerError::Config(ref msg)) if msg.contains("MAX_RETRIES")));
    }

    #[test]
    fn zero_retries_rejected() {
        let result = RunnerConfig::from_lookup(lookup_from(&[("MAX_RETRIES", "0")]));
        assert!(matches!(result, Err(RunnerError::Config(_))));
    }

    #[test]
    fn unset_paths_use_builtins() {
        let config = RunnerConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.load_craft_config().unwrap(), CraftConfig::default());
        assert!(config.load_catalog().unwrap().item_by_name("stick").is_some());
    }

    #[test]
    fn missing_craft_config_file_is_error() {
        let config = RunnerConfig::from_lookup(lookup_from(&[(
            "CRAFT_CONFIG",
            "/nonexistent/artisan/craft.yaml",
        )]))
        .unwrap();
        assert!(matches!(
            config.load_craft_config(),
            Err(RunnerError::CraftConfig(_))
        ));
    }
}
