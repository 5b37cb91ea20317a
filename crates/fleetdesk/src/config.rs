//! Configuration management for fleetdesk.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::navigation::NavigationConfig;
use crate::table::DEFAULT_PAGE_SIZE;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "fleetdesk";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "fleetdesk.db";

/// Default uploads directory name, inside the data directory.
const UPLOADS_DIR_NAME: &str = "uploads";

/// Prefix of configuration environment variables.
const ENV_PREFIX: &str = "FLEETDESK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLEETDESK_`, sections separated
///    by `__`, e.g. `FLEETDESK_TABLE__PAGE_SIZE=25`)
/// 2. TOML config file at `~/.config/fleetdesk/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Upload configuration.
    pub uploads: UploadConfig,
    /// Listing table configuration.
    pub table: TableConfig,
    /// Sidebar navigation.
    pub navigation: NavigationConfig,
}

/// Storage-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Path to the database file.
    /// Defaults to `~/.local/share/fleetdesk/fleetdesk.db`
    pub database_path: Option<PathBuf>,
}

/// Upload-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Directory uploaded documents are stored in.
    /// Defaults to `~/.local/share/fleetdesk/uploads`
    pub directory: Option<PathBuf>,
    /// Largest accepted upload in bytes.
    pub max_file_bytes: usize,
}

/// Listing table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    /// Rows per page.
    pub page_size: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            directory: None,
            max_file_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.table.page_size == 0 {
            return Err(Error::ConfigValidation {
                message: "table.page_size must be greater than 0".to_string(),
            });
        }

        if self.uploads.max_file_bytes == 0 {
            return Err(Error::ConfigValidation {
                message: "uploads.max_file_bytes must be greater than 0".to_string(),
            });
        }

        let nav = &self.navigation;
        let urls = nav
            .main
            .iter()
            .chain(&nav.secondary)
            .chain(nav.registration.iter().flat_map(|g| g.items.iter()))
            .map(|l| (&l.title, &l.url))
            .chain(nav.registration.iter().map(|g| (&g.title, &g.url)));
        for (title, url) in urls {
            if !url.starts_with('/') {
                return Err(Error::ConfigValidation {
                    message: format!("navigation link '{title}' must have an absolute path, got '{url}'"),
                });
            }
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the uploads directory, resolving defaults if not set.
    #[must_use]
    pub fn uploads_dir(&self) -> PathBuf {
        self.uploads
            .directory
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(UPLOADS_DIR_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.storage.database_path.is_none());
        assert!(config.uploads.directory.is_none());
        assert_eq!(config.uploads.max_file_bytes, 10 * 1024 * 1024);
        assert_eq!(config.table.page_size, 10);
        assert_eq!(config.navigation, NavigationConfig::default());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_page_size() {
        let mut config = Config::default();
        config.table.page_size = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("page_size"));
    }

    #[test]
    fn test_validate_zero_upload_limit() {
        let mut config = Config::default();
        config.uploads.max_file_bytes = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("max_file_bytes"));
    }

    #[test]
    fn test_validate_relative_nav_url() {
        let mut config = Config::default();
        config.navigation.registration[0].items[0].url = "dashboard".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("Driver Registration"));
    }

    #[test]
    fn test_default_paths() {
        let config = Config::default();
        assert!(config.database_path().ends_with("fleetdesk/fleetdesk.db"));
        assert!(config.uploads_dir().ends_with("fleetdesk/uploads"));
        assert!(Config::default_config_path().ends_with("fleetdesk/config.toml"));
    }

    #[test]
    fn test_custom_paths() {
        let mut config = Config::default();
        config.storage.database_path = Some(PathBuf::from("/tmp/fd.db"));
        config.uploads.directory = Some(PathBuf::from("/tmp/fd-uploads"));

        assert_eq!(config.database_path(), PathBuf::from("/tmp/fd.db"));
        assert_eq!(config.uploads_dir(), PathBuf::from("/tmp/fd-uploads"));
    }

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[table]
page_size = 25

[uploads]
max_file_bytes = 2048

[navigation]
brand = "Depot"
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.table.page_size, 25);
        assert_eq!(config.uploads.max_file_bytes, 2048);
        assert_eq!(config.navigation.brand, "Depot");
        assert_eq!(config.navigation.secondary.len(), 2);
    }

    #[test]
    fn test_load_from_toml_file_keeps_unset_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[storage]\ndatabase_path = \"/srv/fd.db\"\n").unwrap();

        let config = Config::load_from(Some(path)).unwrap();
        assert_eq!(config.database_path(), PathBuf::from("/srv/fd.db"));
        assert_eq!(config.table.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.uploads.max_file_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(Some(dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.table.page_size, Config::default().table.page_size);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[table]\npage_size = 0\n").unwrap();

        let err = Config::load_from(Some(path)).unwrap_err();
        assert!(matches!(err, Error::ConfigValidation { .. }));
    }
}
