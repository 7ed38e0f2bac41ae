use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::inventory::Device;

/// Severity of a logged report entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Success,
    Info,
    Warning,
    Failure,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Success => "success",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Failure => "failure",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The object an entry is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub id: u64,
    pub name: String,
}

impl From<&Device> for ObjectRef {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id,
            name: device.display_name(),
        }
    }
}

/// One logged result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub subject: Option<ObjectRef>,
    pub message: Option<String>,
}

impl LogEntry {
    pub fn success(device: &Device) -> Self {
        Self {
            level: LogLevel::Success,
            subject: Some(device.into()),
            message: None,
        }
    }

    pub fn warning(device: &Device, message: impl Into<String>) -> Self {
        Self {
            level: LogLevel::Warning,
            subject: Some(device.into()),
            message: Some(message.into()),
        }
    }
}

/// Number of entries logged per level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCounts {
    pub success: usize,
    pub info: usize,
    pub warning: usize,
    pub failure: usize,
}

impl LevelCounts {
    pub fn record(&mut self, level: LogLevel) {
        match level {
            LogLevel::Success => self.success += 1,
            LogLevel::Info => self.info += 1,
            LogLevel::Warning => self.warning += 1,
            LogLevel::Failure => self.failure += 1,
        }
    }

    pub fn add(&mut self, other: &LevelCounts) {
        self.success += other.success;
        self.info += other.info;
        self.warning += other.warning;
        self.failure += other.failure;
    }
}

/// Results of a single test (check) within a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub counts: LevelCounts,
    pub entries: Vec<LogEntry>,
}

impl TestResult {
    pub fn new(name: impl Into<String>, entries: Vec<LogEntry>) -> Self {
        let mut counts = LevelCounts::default();
        for entry in &entries {
            counts.record(entry.level);
        }
        Self {
            name: name.into(),
            counts,
            entries,
        }
    }
}

/// Results of one report run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportResult {
    pub name: String,
    pub description: String,
    /// True if any test logged a failure. Warnings never fail a report.
    pub failed: bool,
    pub tests: Vec<TestResult>,
}

impl ReportResult {
    pub fn new(name: impl Into<String>, description: impl Into<String>, tests: Vec<TestResult>) -> Self {
        let failed = tests.iter().any(|t| t.counts.failure > 0);
        Self {
            name: name.into(),
            description: description.into(),
            failed,
            tests,
        }
    }

    /// Entry counts summed over all tests.
    pub fn totals(&self) -> LevelCounts {
        let mut totals = LevelCounts::default();
        for test in &self.tests {
            totals.add(&test.counts);
        }
        totals
    }
}
