//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::DEFAULT_API_BASE;
use crate::notifications::DEFAULT_TTL_MS;
use crate::store::DEFAULT_PREFIX;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub notifications: NotificationsConfig,

    #[serde(default)]
    pub stores: StoresConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Admin API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Notification center configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_ttl_ms")]
    pub ttl_ms: u64,
}

fn default_ttl_ms() -> u64 {
    DEFAULT_TTL_MS
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            ttl_ms: default_ttl_ms(),
        }
    }
}

/// Endpoint prefixes of the data and admin stores
#[derive(Debug, Clone, Deserialize)]
pub struct StoresConfig {
    #[serde(default = "default_prefix")]
    pub general_prefix: String,

    #[serde(default = "default_prefix")]
    pub admin_prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for StoresConfig {
    fn default() -> Self {
        Self {
            general_prefix: default_prefix(),
            admin_prefix: default_prefix(),
        }
    }
}

/// Session persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_path")]
    pub path: String,
}

fn default_session_path() -> String {
    dirs::cache_dir()
        .map(|p| p.join("fitpanel").join("session.json").to_string_lossy().to_string())
        .unwrap_or_else(|| "./.fitpanel_session.json".to_string())
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Standard config file locations, in lookup order
    pub fn default_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("fitpanel").join("config.toml"));
        }
        paths.push(PathBuf::from("./fitpanel.toml"));
        paths
    }

    /// Load from default locations or environment
    ///
    /// A config file that exists but cannot be read or parsed is an error,
    /// not a silent fallback to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load_first(&Self::default_paths())
    }

    /// Load the first existing file of `candidates`, or defaults with
    /// environment overrides when none exists
    pub fn load_first(candidates: &[PathBuf]) -> Result<Self, ConfigError> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => {
                let config = Self::load_with_env(path)?;
                tracing::info!("Loaded config from {:?}", path);
                Ok(config)
            }
            None => {
                tracing::debug!("Using default config with environment overrides");
                Ok(Self::from_env())
            }
        }
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("FITPANEL_API_BASE_URL") {
            self.api.base_url = url;
        }

        if let Ok(path) = std::env::var("FITPANEL_SESSION_PATH") {
            self.session.path = path;
        }

        if let Ok(level) = std::env::var("FITPANEL_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FITPANEL_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Fitpanel Configuration
#
# Environment variables override these settings:
# - FITPANEL_API_BASE_URL
# - FITPANEL_SESSION_PATH
# - FITPANEL_LOG_LEVEL
# - FITPANEL_LOG_FORMAT

[api]
# Base URL of the admin API
base_url = "http://212.127.78.111/api"

[notifications]
# How long a notification stays visible (ms)
ttl_ms = 3000

[stores]
# Endpoint prefix of the general data views
general_prefix = "/admin"

# Endpoint prefix of the admin views
admin_prefix = "/admin"

[session]
# File holding the session between runs (login flags and token)
# path = "~/.cache/fitpanel/session.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://212.127.78.111/api");
        assert_eq!(config.notifications.ttl_ms, 3000);
        assert_eq!(config.stores.admin_prefix, "/admin");
        assert_eq!(config.logging.format, "pretty");
        assert!(config.session.path.ends_with("session.json"));
    }

    #[test]
    fn test_partial_file() {
        let config = Config::parse(
            r#"
            [api]
            base_url = "http://localhost:8000/api"

            [notifications]
            ttl_ms = 5000
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://localhost:8000/api");
        assert_eq!(config.notifications.ttl_ms, 5000);
        assert_eq!(config.stores.general_prefix, "/admin");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.notifications.ttl_ms, DEFAULT_TTL_MS);
    }

    #[test]
    fn test_load_first_picks_first_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let absent = dir.path().join("absent.toml");
        let first = dir.path().join("first.toml");
        let second = dir.path().join("second.toml");
        std::fs::write(&first, "[notifications]\nttl_ms = 1000\n").unwrap();
        std::fs::write(&second, "[notifications]\nttl_ms = 2000\n").unwrap();

        let config = Config::load_first(&[absent.clone(), first, second]).unwrap();
        assert_eq!(config.notifications.ttl_ms, 1000);

        let config = Config::load_first(&[absent]).unwrap();
        assert_eq!(config.notifications.ttl_ms, DEFAULT_TTL_MS);
    }

    #[test]
    fn test_load_first_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("config.toml");
        let fallback = dir.path().join("fitpanel.toml");
        std::fs::write(&broken, "[api\nbase_url = broken\n").unwrap();
        std::fs::write(&fallback, "[notifications]\nttl_ms = 1000\n").unwrap();

        let result = Config::load_first(&[broken, fallback]);
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_default_paths() {
        let paths = Config::default_paths();
        assert_eq!(paths.last(), Some(&PathBuf::from("./fitpanel.toml")));
        assert!(paths[0].ends_with("fitpanel/config.toml") || paths.len() == 1);
    }

    // All environment cases live in one test so parallel tests never see
    // each other's variables.
    #[test]
    fn test_env_overrides_file_values() {
        const VARS: [&str; 4] = [
            "FITPANEL_API_BASE_URL",
            "FITPANEL_SESSION_PATH",
            "FITPANEL_LOG_LEVEL",
            "FITPANEL_LOG_FORMAT",
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
            [api]
            base_url = "http://file.example/api"

            [session]
            path = "/tmp/from-file.json"

            [logging]
            level = "info"
            format = "pretty"
            "#,
        )
        .unwrap();

        for var in VARS {
            std::env::remove_var(var);
        }
        let config = Config::load_with_env(&path).unwrap();
        assert_eq!(config.api.base_url, "http://file.example/api");
        assert_eq!(config.session.path, "/tmp/from-file.json");
        assert_eq!(config.logging.level, "info");

        std::env::set_var("FITPANEL_API_BASE_URL", "http://env.example/api");
        std::env::set_var("FITPANEL_SESSION_PATH", "/tmp/from-env.json");
        std::env::set_var("FITPANEL_LOG_LEVEL", "debug");
        std::env::set_var("FITPANEL_LOG_FORMAT", "json");

        let config = Config::load_with_env(&path).unwrap();
        let env_only = Config::from_env();

        for var in VARS {
            std::env::remove_var(var);
        }

        assert_eq!(config.api.base_url, "http://env.example/api");
        assert_eq!(config.session.path, "/tmp/from-env.json");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.notifications.ttl_ms, DEFAULT_TTL_MS);

        assert_eq!(env_only.api.base_url, "http://env.example/api");
        assert_eq!(env_only.logging.format, "json");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
