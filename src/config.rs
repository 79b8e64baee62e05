//! Configuration module
//!
//! Application settings are read from a TOML file, by default
//! `~/.config/gamestore-catalog/config.toml`. Every section and key is
//! optional; missing values fall back to the defaults below.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 3000
//!
//! [database]
//! url = "sqlite://./gamestore.db?mode=rwc"
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [pagination]
//! default_per_page = 10
//! max_per_page = 100
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::database::DatabaseConfig;
use crate::shared::DEFAULT_PER_PAGE;

/// Directory name under the user config dir.
const APP_DIR: &str = "gamestore-catalog";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds allowed for in-flight requests after a shutdown signal
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// `json` or `text`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size when `perPage` is absent
    pub default_per_page: u64,
    /// Largest accepted `perPage`; unbounded when unset
    pub max_per_page: Option<u64>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_per_page: DEFAULT_PER_PAGE,
            max_per_page: None,
        }
    }
}

/// Static file serving for game cover images
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadsConfig {
    /// Directory on disk
    pub dir: PathBuf,
    /// URL prefix the directory is mounted at
    pub serve_root: String,
}

impl Default for UploadsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./uploads"),
            serve_root: "/uploads".to_string(),
        }
    }
}

/// Root of the TOML configuration file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub pagination: PaginationConfig,
    pub uploads: UploadsConfig,
}

impl AppConfig {
    /// Load configuration from `path`.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.default_per_page == 0 {
            return Err(ConfigError::Invalid(
                "pagination.default_per_page must be at least 1".to_string(),
            ));
        }
        if let Some(max) = self.pagination.max_per_page {
            if max < self.pagination.default_per_page {
                return Err(ConfigError::Invalid(format!(
                    "pagination.max_per_page ({}) is below default_per_page ({})",
                    max, self.pagination.default_per_page
                )));
            }
        }
        if !self.uploads.serve_root.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "uploads.serve_root must start with '/': {}",
                self.uploads.serve_root
            )));
        }
        Ok(())
    }
}

/// `~/.config/gamestore-catalog/config.toml` (platform config dir).
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join("config.toml")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.pagination.default_per_page, 10);
        assert_eq!(config.pagination.max_per_page, None);
        assert_eq!(config.uploads.serve_root, "/uploads");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[server]\nport = 8080\n\n[pagination]\nmax_per_page = 50\n\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.pagination.max_per_page, Some(50));
        assert_eq!(config.pagination.default_per_page, 10);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.database.url, DatabaseConfig::default().url);
    }

    #[test]
    fn malformed_file_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nport = ").unwrap();

        let err = AppConfig::load(file.path()).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, file.path()),
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn rejects_zero_page_size() {
        let err = AppConfig::from_toml("[pagination]\ndefault_per_page = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_max_below_default() {
        let err = AppConfig::from_toml("[pagination]\ndefault_per_page = 20\nmax_per_page = 5")
            .unwrap_err();
        assert!(err.to_string().contains("max_per_page"));
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("gamestore-catalog/config.toml"));
    }
}
