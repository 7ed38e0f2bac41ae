use std::sync::Arc;

use netbox_reports::adapters::{InMemoryInventory, Snapshot};
use netbox_reports::app::{builtin_reports, select, ReportRunner};
use netbox_reports::domain::config::ChecksConfig;
use netbox_reports::domain::{
    Device, DeviceStatus, DeviceType, Interface, InterfaceKind, InterfaceTemplate, LogEntry,
    LogLevel, ReportResult,
};

fn device(id: u64, name: &str, status: DeviceStatus) -> Device {
    Device {
        id,
        name: Some(name.to_string()),
        status,
        device_type_id: 1,
    }
}

fn interface(id: u64, device_id: u64, name: &str, connected: bool) -> Interface {
    Interface {
        id,
        device_id,
        name: name.to_string(),
        kind: InterfaceKind::new("1000base-t"),
        connected,
    }
}

fn template(id: u64, name: &str) -> InterfaceTemplate {
    InterfaceTemplate {
        id,
        device_type_id: 1,
        name: name.to_string(),
        kind: InterfaceKind::new("1000base-t"),
    }
}

/// D1 matches its template, D2 misses Gi0/2, D3 has Gi0/2 unconnected, D4 is offline.
fn scenario() -> Snapshot {
    Snapshot {
        device_types: vec![DeviceType {
            id: 1,
            manufacturer: "Cisco".to_string(),
            model: "C9300".to_string(),
            display: None,
        }],
        devices: vec![
            device(1, "D1", DeviceStatus::Active),
            device(2, "D2", DeviceStatus::Active),
            device(3, "D3", DeviceStatus::Planned),
            device(4, "D4", DeviceStatus::Offline),
        ],
        interfaces: vec![
            interface(1, 1, "Gi0/1", true),
            interface(2, 1, "Gi0/2", true),
            interface(3, 2, "Gi0/1", true),
            interface(4, 3, "Gi0/1", true),
            interface(5, 3, "Gi0/2", false),
            interface(6, 4, "Gi0/1", false),
            Interface {
                id: 7,
                device_id: 1,
                name: "Port-channel1".to_string(),
                kind: InterfaceKind::new("lag"),
                connected: false,
            },
        ],
        interface_templates: vec![template(1, "Gi0/1"), template(2, "Gi0/2")],
    }
}

async fn run_all(snapshot: Snapshot, settings: ChecksConfig) -> Vec<ReportResult> {
    let runner = ReportRunner::new(Arc::new(InMemoryInventory::new(snapshot)), settings);
    let reports = builtin_reports();
    let selections = select(&[], &reports).unwrap();
    runner.run_selected(&reports, &selections).await.unwrap()
}

fn entries<'a>(results: &'a [ReportResult], test: &str, device: &str) -> Vec<&'a LogEntry> {
    results
        .iter()
        .flat_map(|r| r.tests.iter())
        .filter(|t| t.name == test)
        .flat_map(|t| t.entries.iter())
        .filter(|e| e.subject.as_ref().is_some_and(|s| s.name == device))
        .collect()
}

fn levels(entries: &[&LogEntry]) -> Vec<LogLevel> {
    entries.iter().map(|e| e.level).collect()
}

#[tokio::test]
async fn matching_device_passes_template_checks() {
    let results = run_all(scenario(), ChecksConfig::default()).await;

    assert_eq!(levels(&entries(&results, "test_count_interfaces", "D1")), vec![LogLevel::Success]);
    assert_eq!(levels(&entries(&results, "test_interface_name", "D1")), vec![LogLevel::Success]);
    assert_eq!(levels(&entries(&results, "test_interface_connection", "D1")), vec![LogLevel::Success]);
}

#[tokio::test]
async fn missing_interface_warns_in_both_template_checks() {
    let results = run_all(scenario(), ChecksConfig::default()).await;

    let count = entries(&results, "test_count_interfaces", "D2");
    assert_eq!(count.len(), 1);
    assert_eq!(count[0].level, LogLevel::Warning);
    assert_eq!(count[0].message.as_deref(), Some("Cisco C9300 has 2, D2 has 1"));

    let names = entries(&results, "test_interface_name", "D2");
    assert_eq!(names.len(), 1);
    assert_eq!(
        names[0].message.as_deref(),
        Some(r#"Interfaces on DeviceType NOT on the Device: ["Gi0/2"]"#)
    );
}

#[tokio::test]
async fn disconnected_interface_is_reported() {
    let results = run_all(scenario(), ChecksConfig::default()).await;

    let connection = entries(&results, "test_interface_connection", "D3");
    assert_eq!(connection.len(), 1);
    assert_eq!(connection[0].level, LogLevel::Warning);
    assert_eq!(
        connection[0].message.as_deref(),
        Some(r#"Not connected interfaces: ["Gi0/2"]"#)
    );
}

#[tokio::test]
async fn offline_device_is_skipped() {
    let results = run_all(scenario(), ChecksConfig::default()).await;

    for test in ["test_count_interfaces", "test_interface_name", "test_interface_connection"] {
        assert!(entries(&results, test, "D4").is_empty(), "{} logged for D4", test);
    }
}

#[tokio::test]
async fn eligible_statuses_are_configurable() {
    let settings = ChecksConfig {
        eligible_statuses: [DeviceStatus::Offline].into_iter().collect(),
        ..ChecksConfig::default()
    };
    let results = run_all(scenario(), settings).await;

    assert_eq!(
        levels(&entries(&results, "test_interface_connection", "D4")),
        vec![LogLevel::Warning]
    );
    assert!(entries(&results, "test_interface_connection", "D1").is_empty());
}

#[tokio::test]
async fn warnings_do_not_fail_reports() {
    let results = run_all(scenario(), ChecksConfig::default()).await;

    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| !r.failed));
    assert_eq!(results[0].totals().warning, 2);
    assert_eq!(results[1].totals().warning, 1);
}

#[tokio::test]
async fn rerun_gives_identical_results() {
    let first = run_all(scenario(), ChecksConfig::default()).await;
    let second = run_all(scenario(), ChecksConfig::default()).await;
    assert_eq!(first, second);
}
