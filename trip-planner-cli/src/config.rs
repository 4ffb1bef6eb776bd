//! Application configuration storage
//!
//! Handles persistent storage of the backend connection settings.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use trip_http_collaborator::HttpCollaboratorConfig;

use crate::constants::{env, paths};

/// Full application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    /// How to reach the trip planner backend
    #[serde(default)]
    pub collaborator: HttpCollaboratorConfig,
}

impl AppConfig {
    /// Load configuration from disk
    ///
    /// A missing file yields the defaults.
    pub async fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(paths::CONFIG_FILE);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path).await.map_err(ConfigError::Io)?;

        serde_json::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Save configuration to disk
    pub async fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        // Ensure directory exists
        fs::create_dir_all(config_dir).await.map_err(ConfigError::Io)?;

        let config_path = config_dir.join(paths::CONFIG_FILE);
        let contents = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;

        fs::write(&config_path, contents).await.map_err(ConfigError::Io)?;

        log::info!("Configuration saved to {:?}", config_path);
        Ok(())
    }

    /// Apply overrides from the environment
    pub fn with_env_overrides(self) -> Self {
        self.with_base_url_override(std::env::var(env::BASE_URL).ok())
    }

    /// Replace the base URL when an override is given
    pub fn with_base_url_override(mut self, base_url: Option<String>) -> Self {
        if let Some(base_url) = base_url.filter(|url| !url.trim().is_empty()) {
            log::debug!("Using backend {}", base_url);
            self.collaborator.base_url = base_url;
        }
        self
    }
}

/// Platform config directory for the app, if the platform has one
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(paths::APP_DIR))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(dir.path()).await.unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");

        let mut config = AppConfig::default();
        config.collaborator.base_url = "https://trips.example".to_string();
        config.collaborator.timeout_secs = 30;
        config.save(&nested).await.unwrap();

        let loaded = AppConfig::load(&nested).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(paths::CONFIG_FILE), "{ not json").unwrap();

        let err = AppConfig::load(dir.path()).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_base_url_override() {
        let config = AppConfig::default()
            .with_base_url_override(Some("http://10.0.0.5:8000".to_string()));
        assert_eq!(config.collaborator.base_url, "http://10.0.0.5:8000");

        let config = AppConfig::default().with_base_url_override(Some("  ".to_string()));
        assert_eq!(config, AppConfig::default());
    }
}
