//! Comparisons between a device's interfaces and its device type's templates.
//!
//! Everything here is pure: callers pass interfaces and templates that are
//! already restricted to physical kinds.

use std::collections::BTreeSet;

use crate::domain::inventory::{Interface, InterfaceTemplate};

/// Interface counts on a device and on its device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountComparison {
    pub device: usize,
    pub template: usize,
}

impl CountComparison {
    pub fn new(interfaces: &[Interface], templates: &[InterfaceTemplate]) -> Self {
        Self {
            device: interfaces.len(),
            template: templates.len(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.device == self.template
    }
}

/// Interface names present on only one side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameDiff {
    /// On the device but not on the device type.
    pub on_device_only: BTreeSet<String>,
    /// On the device type but not on the device.
    pub on_template_only: BTreeSet<String>,
}

impl NameDiff {
    pub fn new(interfaces: &[Interface], templates: &[InterfaceTemplate]) -> Self {
        let device_names: BTreeSet<String> = interfaces.iter().map(|i| i.name.clone()).collect();
        let template_names: BTreeSet<String> = templates.iter().map(|t| t.name.clone()).collect();
        Self::between(&device_names, &template_names)
    }

    /// Set difference in both directions.
    fn between(device_names: &BTreeSet<String>, template_names: &BTreeSet<String>) -> Self {
        Self {
            on_device_only: device_names.difference(template_names).cloned().collect(),
            on_template_only: template_names.difference(device_names).cloned().collect(),
        }
    }

    /// True when both name sets are equal.
    pub fn is_empty(&self) -> bool {
        self.on_device_only.is_empty() && self.on_template_only.is_empty()
    }
}

/// Names of interfaces without a recorded connection, in input order.
pub fn disconnected_names(interfaces: &[Interface]) -> Vec<String> {
    interfaces
        .iter()
        .filter(|i| !i.connected)
        .map(|i| i.name.clone())
        .collect()
}

/// Render a list of names for a report message: `["Gi0/1", "Gi0/2"]`.
pub fn format_names<'a, I>(names: I) -> String
where
    I: IntoIterator<Item = &'a String>,
{
    let names: Vec<&str> = names.into_iter().map(String::as_str).collect();
    format!("{:?}", names)
}
