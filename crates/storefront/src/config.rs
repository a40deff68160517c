//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use checkout::StoreConfig;

/// Replay configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `CATALOG_PATH`: catalog JSON file (default: `"demos/catalog.json"`)
/// - `SESSION_PATH`: session script JSON file (default: `"demos/session.json"`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
///
/// Store pricing comes from [`StoreConfig::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: PathBuf,
    pub session_path: PathBuf,
    pub log_level: String,
    pub store: StoreConfig,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            catalog_path: std::env::var("CATALOG_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.catalog_path),
            session_path: std::env::var("SESSION_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_path),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            store: StoreConfig::from_env(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from("demos/catalog.json"),
            session_path: PathBuf::from("demos/session.json"),
            log_level: "info".to_string(),
            store: StoreConfig::default(),
        }
    }
}
