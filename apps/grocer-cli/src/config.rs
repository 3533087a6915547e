//! # Shell Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority)                              │
//! │     --server-url http://catalog:3000  --output-dir ./lists             │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     GROCER_SERVER_URL, GROCER_EXPORT_DIR,                              │
//! │     GROCER_REQUEST_TIMEOUT_SECS                                        │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/grocer/config.toml (Linux)                               │
//! │     ~/Library/Application Support/com.grocer.grocer/config.toml       │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! server_url = "http://localhost:3000"
//! timeout_secs = 10
//!
//! [export]
//! output_dir = "."
//! format = "text"   # text | json
//!
//! [quantity]
//! measured_units = ["kg", "g", "l", "ml"]
//!
//! [quantity.measured]
//! step = 0.25
//! floor = 0.25
//! precision = 2
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use grocer_catalog::{CatalogError, CatalogSettings};
use grocer_core::{CoreError, ExportFormat, PolicyTable, ValidationError};

/// Startup failures. The only fatal errors in the shell.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to write config file: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),

    #[error("No config path available")]
    NoPath,

    #[error("Invalid start date: {0}")]
    Date(#[from] CoreError),

    #[error("Cannot set up catalog client: {0}")]
    Catalog(#[from] CatalogError),
}

/// Where and how exports are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub format: ExportFormat,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            output_dir: default_output_dir(),
            format: ExportFormat::default(),
        }
    }
}

/// Overrides given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub server_url: Option<String>,
    pub output_dir: Option<PathBuf>,
}

/// Complete shell configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub quantity: PolicyTable,
}

impl AppConfig {
    /// Loads configuration from file, environment, flags and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (config.toml)
    /// 3. Environment variables
    /// 4. Command-line flags
    pub fn load(config_path: Option<PathBuf>, overrides: &CliOverrides) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.apply_cli_overrides(overrides);
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> Result<(), ConfigError> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, toml::to_string_pretty(self)?)?;
        info!(?path, "Config saved");
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.catalog.validate()?;
        self.quantity.validate()?;
        if self.export.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::Required {
                field: "export.output_dir".to_string(),
            });
        }
        Ok(())
    }

    /// Applies `GROCER_*` overrides looked up through `lookup`.
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("GROCER_SERVER_URL") {
            debug!(url = %url, "Overriding server URL from environment");
            self.catalog.server_url = url;
        }

        if let Some(dir) = lookup("GROCER_EXPORT_DIR") {
            debug!(dir = %dir, "Overriding export directory from environment");
            self.export.output_dir = PathBuf::from(dir);
        }

        if let Some(timeout) = lookup("GROCER_REQUEST_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.catalog.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring non-numeric GROCER_REQUEST_TIMEOUT_SECS"),
            }
        }
    }

    fn apply_cli_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(url) = &overrides.server_url {
            self.catalog.server_url = url.clone();
        }
        if let Some(dir) = &overrides.output_dir {
            self.export.output_dir = dir.clone();
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "grocer", "grocer")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("grocer-config-{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(config.export.format, ExportFormat::Text);
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [catalog]
            server_url = "https://catalog.example.com"

            [export]
            format = "json"

            [quantity.measured]
            step = 0.5
            floor = 0.5
            precision = 1
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.server_url, "https://catalog.example.com");
        assert_eq!(config.catalog.timeout_secs, 10);
        assert_eq!(config.export.format, ExportFormat::Json);
        assert_eq!(config.quantity.measured.step, 0.5);
        assert_eq!(config.quantity.count.step, 1.0);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("GROCER_SERVER_URL", "http://10.0.0.5:3000"),
            ("GROCER_EXPORT_DIR", "/tmp/lists"),
            ("GROCER_REQUEST_TIMEOUT_SECS", "3"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.catalog.server_url, "http://10.0.0.5:3000");
        assert_eq!(config.export.output_dir, PathBuf::from("/tmp/lists"));
        assert_eq!(config.catalog.timeout_secs, 3);
    }

    #[test]
    fn test_bad_timeout_env_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|k| {
            (k == "GROCER_REQUEST_TIMEOUT_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.catalog.timeout_secs, 10);
    }

    #[test]
    fn test_cli_overrides_win() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|k| {
            (k == "GROCER_SERVER_URL").then(|| "http://from-env:1".to_string())
        });
        config.apply_cli_overrides(&CliOverrides {
            server_url: Some("http://from-flag:2".to_string()),
            output_dir: None,
        });
        assert_eq!(config.catalog.server_url, "http://from-flag:2");
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();
        config.catalog.server_url = "localhost:3000".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.quantity.measured.step = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("config.toml");
        let mut config = AppConfig::default();
        config.catalog.server_url = "http://saved:3000".to_string();
        config.export.format = ExportFormat::Json;
        config.save(Some(path.clone())).unwrap();

        let loaded = AppConfig::load(Some(path.clone()), &CliOverrides::default()).unwrap();
        // Environment may override the URL on a developer machine.
        if std::env::var("GROCER_SERVER_URL").is_err() {
            assert_eq!(loaded.catalog.server_url, "http://saved:3000");
        }
        assert_eq!(loaded.export.format, ExportFormat::Json);

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let path = temp_path("config.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[catalog\nserver_url = 1").unwrap();

        let result = AppConfig::load(Some(path.clone()), &CliOverrides::default());
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let _ = std::fs::remove_dir_all(path.parent().unwrap());
    }
}
