use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Device lifecycle status, as defined by NetBox `DeviceStatusChoices`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Offline,
    Active,
    Planned,
    Staged,
    Failed,
    Inventory,
    Decommissioning,
    /// Any status this crate does not know about. Never eligible.
    #[serde(other)]
    Unknown,
}

impl DeviceStatus {
    /// The NetBox slug for this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Offline => "offline",
            DeviceStatus::Active => "active",
            DeviceStatus::Planned => "planned",
            DeviceStatus::Staged => "staged",
            DeviceStatus::Failed => "failed",
            DeviceStatus::Inventory => "inventory",
            DeviceStatus::Decommissioning => "decommissioning",
            DeviceStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeviceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "offline" => Ok(DeviceStatus::Offline),
            "active" => Ok(DeviceStatus::Active),
            "planned" => Ok(DeviceStatus::Planned),
            "staged" => Ok(DeviceStatus::Staged),
            "failed" => Ok(DeviceStatus::Failed),
            "inventory" => Ok(DeviceStatus::Inventory),
            "decommissioning" => Ok(DeviceStatus::Decommissioning),
            other => Err(format!("unknown device status '{}'", other)),
        }
    }
}

/// The set of statuses whose devices are checked.
pub type StatusSet = BTreeSet<DeviceStatus>;

/// Statuses checked when nothing else is configured: active and planned.
pub fn default_eligible_statuses() -> StatusSet {
    [DeviceStatus::Active, DeviceStatus::Planned].into_iter().collect()
}

/// Interface type slug (e.g. "1000base-t", "virtual", "lag").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceKind(pub String);

impl InterfaceKind {
    pub const VIRTUAL: &'static str = "virtual";
    pub const LAG: &'static str = "lag";

    /// Types that never take part in any check.
    pub const NON_PHYSICAL: [&'static str; 2] = [Self::VIRTUAL, Self::LAG];

    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True unless the type is `virtual` or `lag`.
    pub fn is_physical(&self) -> bool {
        !Self::NON_PHYSICAL.contains(&self.0.as_str())
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A device in the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: u64,
    /// NetBox allows unnamed devices.
    #[serde(default)]
    pub name: Option<String>,
    pub status: DeviceStatus,
    #[serde(rename = "device_type")]
    pub device_type_id: u64,
}

impl Device {
    /// Name used in report output.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("device #{}", self.id),
        }
    }
}

/// A device type (model) that devices are instantiated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: u64,
    pub manufacturer: String,
    pub model: String,
    /// Display string provided by NetBox, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl DeviceType {
    /// "<manufacturer> <model>" unless NetBox supplied a display string.
    pub fn display_name(&self) -> String {
        match &self.display {
            Some(display) if !display.is_empty() => display.clone(),
            _ => format!("{} {}", self.manufacturer, self.model),
        }
    }
}

/// An interface on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interface {
    pub id: u64,
    #[serde(rename = "device")]
    pub device_id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InterfaceKind,
    /// Whether a connection is recorded for this interface.
    #[serde(default)]
    pub connected: bool,
}

impl Interface {
    pub fn is_physical(&self) -> bool {
        self.kind.is_physical()
    }
}

/// An interface defined on a device type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceTemplate {
    pub id: u64,
    #[serde(rename = "device_type")]
    pub device_type_id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InterfaceKind,
}

impl InterfaceTemplate {
    pub fn is_physical(&self) -> bool {
        self.kind.is_physical()
    }
}
