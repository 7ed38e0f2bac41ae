use std::io::Write;

use crate::domain::{DomainError, LogEntry, ReportResult};

/// Port receiving the entries a check logs while it runs.
pub trait ResultSink: Send + Sync {
    /// Record one entry.
    fn log(&self, entry: LogEntry);
}

/// Port for rendering finished report results.
pub trait ReportWriter: Send + Sync {
    /// Write all results to `out`.
    fn write(&self, results: &[ReportResult], out: &mut dyn Write) -> Result<(), DomainError>;
}
