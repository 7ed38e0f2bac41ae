use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::{InMemoryInventory, NetBoxInventory, ReqwestClient, TomlConfigStore};
use crate::domain::{AppConfig, DomainError};
use crate::infrastructure::init_logging;
use crate::ports::{ConfigStore, InventoryRepository};

/// Orchestrates initialization: configuration, logging, and the inventory.
pub struct AppController {
    config: AppConfig,
    config_store: TomlConfigStore,
    _log_guard: Option<WorkerGuard>,
}

impl AppController {
    /// Load configuration from `config_path` (or the default location) and
    /// start logging. `log_level` overrides the configured level.
    pub fn new(config_path: Option<PathBuf>, log_level: Option<&str>) -> Result<Self, DomainError> {
        // Step 1: Load configuration
        let config_store = TomlConfigStore::new(config_path)?;
        let mut config = config_store.load()?;
        config.apply_env();
        if let Some(level) = log_level {
            config.logging.level = level.to_string();
        }

        // Step 2: Initialize logging
        let log_guard = init_logging(&config_store.logs_dir(), &config.logging)?;

        info!(
            config_path = ?config_store.config_path(),
            netbox = %config.netbox.url,
            statuses = ?config.checks.eligible_statuses,
            "AppController initialized"
        );

        Ok(Self {
            config,
            config_store,
            _log_guard: log_guard,
        })
    }

    /// Get the current configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AppConfig {
        &mut self.config
    }

    /// The inventory to check: a snapshot file if given, otherwise NetBox.
    pub fn inventory(&self, snapshot: Option<&Path>) -> Result<Arc<dyn InventoryRepository>, DomainError> {
        match snapshot {
            Some(path) => {
                info!(path = ?path, "Using inventory snapshot");
                Ok(Arc::new(InMemoryInventory::from_file(path)?))
            }
            None => {
                let client = ReqwestClient::new(&self.config.netbox)?;
                info!(url = %self.config.netbox.url, "Using NetBox API");
                Ok(Arc::new(NetBoxInventory::new(client, &self.config.netbox)?))
            }
        }
    }
}
