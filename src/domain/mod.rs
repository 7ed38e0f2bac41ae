pub mod config;
pub mod error;
pub mod inventory;
pub mod reconcile;
pub mod report;

pub use config::{AppConfig, OutputFormat};
pub use error::DomainError;
pub use inventory::{
    default_eligible_statuses, Device, DeviceStatus, DeviceType, Interface, InterfaceKind,
    InterfaceTemplate, StatusSet,
};
pub use report::{LevelCounts, LogEntry, LogLevel, ObjectRef, ReportResult, TestResult};
