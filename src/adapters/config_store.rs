use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::domain::{AppConfig, DomainError};
use crate::ports::ConfigStore;

const APP_DIR: &str = "netbox-reports";

/// TOML-based configuration store.
pub struct TomlConfigStore {
    config_path: PathBuf,
}

impl TomlConfigStore {
    /// Create a store for `path`, or for the OS-specific default location.
    /// - macOS: ~/Library/Application Support/netbox-reports/config.toml
    /// - Windows: %APPDATA%\netbox-reports\config.toml
    /// - Linux: ~/.config/netbox-reports/config.toml
    pub fn new(path: Option<PathBuf>) -> Result<Self, DomainError> {
        let config_path = match path {
            Some(path) => path,
            None => dirs::config_dir()
                .map(|p| p.join(APP_DIR).join("config.toml"))
                .ok_or_else(|| {
                    DomainError::Config("Could not find configuration directory".to_string())
                })?,
        };

        debug!(path = ?config_path, "ConfigStore initialized");

        Ok(Self { config_path })
    }
}

impl ConfigStore for TomlConfigStore {
    fn load(&self) -> Result<AppConfig, DomainError> {
        if self.config_path.exists() {
            let content = fs::read_to_string(&self.config_path)?;
            let config: AppConfig = toml::from_str(&content)?;
            debug!(path = ?self.config_path, "Configuration loaded");
            Ok(config)
        } else {
            debug!(path = ?self.config_path, "Configuration file not found, using defaults");
            Ok(AppConfig::new())
        }
    }

    fn save(&self, config: &AppConfig) -> Result<(), DomainError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content)?;

        info!(path = ?self.config_path, "Configuration saved");
        Ok(())
    }

    fn config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    /// - Linux: ~/.local/share/netbox-reports/logs/
    /// - elsewhere: the platform data directory, or next to the config file.
    fn logs_dir(&self) -> PathBuf {
        dirs::data_local_dir()
            .map(|p| p.join(APP_DIR).join("logs"))
            .unwrap_or_else(|| {
                self.config_path
                    .parent()
                    .map(|p| p.join("logs"))
                    .unwrap_or_else(|| PathBuf::from("logs"))
            })
    }
}
