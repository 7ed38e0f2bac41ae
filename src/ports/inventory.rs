use async_trait::async_trait;

use crate::domain::{Device, DeviceType, DomainError, Interface, InterfaceTemplate, StatusSet};

/// Read-only access to the device inventory.
///
/// Every call goes to the backing store; implementations do not cache.
/// Listing calls that return interfaces or templates only return physical
/// ones (type neither `virtual` nor `lag`).
#[async_trait]
pub trait InventoryRepository: Send + Sync {
    /// List devices whose status is in `statuses`, in store order.
    async fn list_devices(&self, statuses: &StatusSet) -> Result<Vec<Device>, DomainError>;

    /// List the physical interfaces of a device.
    async fn list_physical_interfaces(&self, device: &Device) -> Result<Vec<Interface>, DomainError>;

    /// Look up a device type by id.
    ///
    /// Returns `DomainError::NotFound` if it does not exist.
    async fn get_device_type(&self, id: u64) -> Result<DeviceType, DomainError>;

    /// List the physical interface templates of a device type.
    async fn list_physical_templates(
        &self,
        device_type: &DeviceType,
    ) -> Result<Vec<InterfaceTemplate>, DomainError>;

    /// Look up an interface by id.
    ///
    /// Returns `DomainError::NotFound` if it does not exist.
    async fn get_interface(&self, id: u64) -> Result<Interface, DomainError>;
}
