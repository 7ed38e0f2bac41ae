use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::domain::{LogEntry, LogLevel};
use crate::ports::ResultSink;

/// Collects the entries of one test run and mirrors them to the log.
pub struct MemorySink {
    report: String,
    test: String,
    entries: Mutex<Vec<LogEntry>>,
}

impl MemorySink {
    pub fn new(report: impl Into<String>, test: impl Into<String>) -> Self {
        Self {
            report: report.into(),
            test: test.into(),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Entries in the order they were logged.
    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries.into_inner()
    }
}

impl ResultSink for MemorySink {
    fn log(&self, entry: LogEntry) {
        let subject = entry.subject.as_ref().map(|s| s.name.as_str()).unwrap_or("-");
        let message = entry.message.as_deref().unwrap_or("");
        match entry.level {
            LogLevel::Success | LogLevel::Info => {
                info!(report = %self.report, test = %self.test, device = subject, level = %entry.level, "{}", message)
            }
            LogLevel::Warning => {
                warn!(report = %self.report, test = %self.test, device = subject, "{}", message)
            }
            LogLevel::Failure => {
                error!(report = %self.report, test = %self.test, device = subject, "{}", message)
            }
        }

        self.entries.lock().push(entry);
    }
}
