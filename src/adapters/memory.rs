use std::fs;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    Device, DeviceType, DomainError, Interface, InterfaceTemplate, StatusSet,
};
use crate::ports::InventoryRepository;

/// A point-in-time export of the inventory records the checks read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub device_types: Vec<DeviceType>,
    pub devices: Vec<Device>,
    pub interfaces: Vec<Interface>,
    pub interface_templates: Vec<InterfaceTemplate>,
}

impl Snapshot {
    /// Read a JSON snapshot file.
    pub fn from_file(path: &Path) -> Result<Self, DomainError> {
        let content = fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        info!(
            path = ?path,
            devices = snapshot.devices.len(),
            device_types = snapshot.device_types.len(),
            interfaces = snapshot.interfaces.len(),
            "Snapshot loaded"
        );
        Ok(snapshot)
    }
}

/// Inventory held in memory. Records are returned in insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryInventory {
    snapshot: Snapshot,
}

impl InMemoryInventory {
    pub fn new(snapshot: Snapshot) -> Self {
        Self { snapshot }
    }

    pub fn from_file(path: &Path) -> Result<Self, DomainError> {
        Snapshot::from_file(path).map(Self::new)
    }
}

#[async_trait]
impl InventoryRepository for InMemoryInventory {
    async fn list_devices(&self, statuses: &StatusSet) -> Result<Vec<Device>, DomainError> {
        Ok(self
            .snapshot
            .devices
            .iter()
            .filter(|d| statuses.contains(&d.status))
            .cloned()
            .collect())
    }

    async fn list_physical_interfaces(&self, device: &Device) -> Result<Vec<Interface>, DomainError> {
        Ok(self
            .snapshot
            .interfaces
            .iter()
            .filter(|i| i.device_id == device.id && i.is_physical())
            .cloned()
            .collect())
    }

    async fn get_device_type(&self, id: u64) -> Result<DeviceType, DomainError> {
        self.snapshot
            .device_types
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or(DomainError::NotFound {
                kind: "device type",
                id,
            })
    }

    async fn list_physical_templates(
        &self,
        device_type: &DeviceType,
    ) -> Result<Vec<InterfaceTemplate>, DomainError> {
        Ok(self
            .snapshot
            .interface_templates
            .iter()
            .filter(|t| t.device_type_id == device_type.id && t.is_physical())
            .cloned()
            .collect())
    }

    async fn get_interface(&self, id: u64) -> Result<Interface, DomainError> {
        self.snapshot
            .interfaces
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(DomainError::NotFound {
                kind: "interface",
                id,
            })
    }
}
