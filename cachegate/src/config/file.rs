//! Configuration file handling for ~/.cachegate/config.ini.
//!
//! Parsing lives in [`super::parser`], serialization in [`super::writer`].

use ini::Ini;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::settings::ConfigFile;
use crate::arbiter::ArbiterConfig;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] ini::Error),

    /// Failed to write config file
    #[error("Failed to write config file: {0}")]
    WriteError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },

    /// Failed to create config directory
    #[error("Failed to create config directory: {0}")]
    DirectoryError(std::io::Error),
}

impl ConfigFile {
    /// Load configuration from the default path (~/.cachegate/config.ini).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path)?;
        super::parser::parse_ini(&ini)
    }

    /// Save configuration to the default path (~/.cachegate/config.ini).
    pub fn save(&self) -> Result<(), ConfigFileError> {
        self.save_to(&config_file_path())
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigFileError::DirectoryError)?;
        }

        let content = super::writer::to_config_string(self);
        std::fs::write(path, content).map_err(|e| ConfigFileError::WriteError(e.to_string()))
    }

    /// Arbiter settings for the configured generation, origin and seed list.
    pub fn to_arbiter_config(&self) -> ArbiterConfig {
        ArbiterConfig::new(self.cache.name.clone(), self.origin.url.clone())
            .with_seed_assets(self.seed.assets.iter().cloned())
    }
}

/// Get the path to the config directory (~/.cachegate).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".cachegate")
}

/// Get the path to the config file (~/.cachegate/config.ini).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.ini")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbiter::{DEFAULT_CACHE_NAME, DEFAULT_SEED_ASSETS};
    use crate::network::DEFAULT_TIMEOUT_SECS;

    #[test]
    fn test_default_config() {
        let config = ConfigFile::default();

        assert_eq!(config.cache.name, DEFAULT_CACHE_NAME);
        assert_eq!(config.origin.url.as_str(), "http://localhost:5000/");
        assert_eq!(config.seed.assets.len(), DEFAULT_SEED_ASSETS.len());
        assert_eq!(config.network.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.ini");

        let config = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.ini");

        let mut config = ConfigFile::default();
        config.cache.name = "app-v7".to_string();
        config.origin.url = url::Url::parse("https://example.com:8443").unwrap();
        config.seed.assets = vec!["/".to_string(), "/static/app.js".to_string()];
        config.network.timeout_secs = 5;
        config.save_to(&config_path).unwrap();

        let loaded = ConfigFile::load_from(&config_path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_to_arbiter_config() {
        let mut config = ConfigFile::default();
        config.cache.name = "app-v2".to_string();
        config.seed.assets = vec!["/".to_string()];

        let arbiter = config.to_arbiter_config();

        assert_eq!(arbiter.cache_name(), "app-v2");
        assert_eq!(arbiter.origin(), &config.origin.url);
        assert_eq!(arbiter.seed_assets(), ["/".to_string()]);
    }

    #[test]
    fn test_config_file_path_under_home() {
        let path = config_file_path();
        assert!(path.ends_with(".cachegate/config.ini"));
    }
}
