//! The interface consistency checks.
//!
//! Each check walks the eligible devices in repository order and logs
//! results for every device into the sink it is given. Repository errors
//! abort the check.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::config::ChecksConfig;
use crate::domain::reconcile::{disconnected_names, format_names, CountComparison, NameDiff};
use crate::domain::{Device, DomainError, Interface, LogEntry};
use crate::ports::{InventoryRepository, ResultSink};

/// What a check needs to run.
pub struct CheckContext<'a> {
    pub inventory: &'a dyn InventoryRepository,
    pub settings: &'a ChecksConfig,
}

impl CheckContext<'_> {
    async fn eligible_devices(&self) -> Result<Vec<Device>, DomainError> {
        let devices = self
            .inventory
            .list_devices(&self.settings.eligible_statuses)
            .await?;
        debug!(count = devices.len(), "Eligible devices");
        Ok(devices)
    }
}

/// A single test within a report.
#[async_trait]
pub trait Check: Send + Sync {
    /// Test name, e.g. `test_count_interfaces`.
    fn name(&self) -> &'static str;

    async fn run(&self, ctx: &CheckContext<'_>, sink: &dyn ResultSink) -> Result<(), DomainError>;
}

/// Compares the number of physical interfaces on each device with its device type.
pub struct InterfaceCountCheck;

#[async_trait]
impl Check for InterfaceCountCheck {
    fn name(&self) -> &'static str {
        "test_count_interfaces"
    }

    async fn run(&self, ctx: &CheckContext<'_>, sink: &dyn ResultSink) -> Result<(), DomainError> {
        for device in ctx.eligible_devices().await? {
            let interfaces = ctx.inventory.list_physical_interfaces(&device).await?;
            let device_type = ctx.inventory.get_device_type(device.device_type_id).await?;
            let templates = ctx.inventory.list_physical_templates(&device_type).await?;

            let counts = CountComparison::new(&interfaces, &templates);
            if counts.is_match() {
                sink.log(LogEntry::success(&device));
            } else {
                sink.log(LogEntry::warning(
                    &device,
                    format!(
                        "{} has {}, {} has {}",
                        device_type.display_name(),
                        counts.template,
                        device.display_name(),
                        counts.device
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Reconciles physical interface names on each device with its device type.
pub struct InterfaceNameCheck;

#[async_trait]
impl Check for InterfaceNameCheck {
    fn name(&self) -> &'static str {
        "test_interface_name"
    }

    async fn run(&self, ctx: &CheckContext<'_>, sink: &dyn ResultSink) -> Result<(), DomainError> {
        for device in ctx.eligible_devices().await? {
            let interfaces = ctx.inventory.list_physical_interfaces(&device).await?;
            let device_type = ctx.inventory.get_device_type(device.device_type_id).await?;
            let templates = ctx.inventory.list_physical_templates(&device_type).await?;

            let diff = NameDiff::new(&interfaces, &templates);
            if diff.is_empty() {
                sink.log(LogEntry::success(&device));
                continue;
            }

            if !diff.on_device_only.is_empty() {
                sink.log(LogEntry::warning(
                    &device,
                    format!(
                        "Interfaces on Device NOT on the DeviceType: {}",
                        format_names(&diff.on_device_only)
                    ),
                ));
            }
            if !diff.on_template_only.is_empty() {
                sink.log(LogEntry::warning(
                    &device,
                    format!(
                        "Interfaces on DeviceType NOT on the Device: {}",
                        format_names(&diff.on_template_only)
                    ),
                ));
            }
        }
        Ok(())
    }
}

/// Reports physical interfaces without a recorded connection.
pub struct InterfaceConnectionCheck;

impl InterfaceConnectionCheck {
    async fn current(
        ctx: &CheckContext<'_>,
        interfaces: Vec<Interface>,
    ) -> Result<Vec<Interface>, DomainError> {
        if !ctx.settings.refetch_interfaces {
            return Ok(interfaces);
        }

        let mut fresh = Vec::with_capacity(interfaces.len());
        for interface in interfaces {
            fresh.push(ctx.inventory.get_interface(interface.id).await?);
        }
        Ok(fresh)
    }
}

#[async_trait]
impl Check for InterfaceConnectionCheck {
    fn name(&self) -> &'static str {
        "test_interface_connection"
    }

    async fn run(&self, ctx: &CheckContext<'_>, sink: &dyn ResultSink) -> Result<(), DomainError> {
        for device in ctx.eligible_devices().await? {
            let interfaces = ctx.inventory.list_physical_interfaces(&device).await?;
            if interfaces.is_empty() {
                sink.log(LogEntry::success(&device));
                continue;
            }

            let interfaces = Self::current(ctx, interfaces).await?;
            let not_connected = disconnected_names(&interfaces);
            if not_connected.is_empty() {
                sink.log(LogEntry::success(&device));
            } else {
                sink.log(LogEntry::warning(
                    &device,
                    format!("Not connected interfaces: {}", format_names(&not_connected)),
                ));
            }
        }
        Ok(())
    }
}
