use std::io::Write;

use crate::domain::{DomainError, LogEntry, OutputFormat, ReportResult};
use crate::ports::ReportWriter;

/// Human-readable output, one line per entry.
pub struct TextReportWriter;

/// Pretty-printed JSON array of report results.
pub struct JsonReportWriter;

/// Writer for the configured output format.
pub fn writer_for(format: OutputFormat) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Text => Box::new(TextReportWriter),
        OutputFormat::Json => Box::new(JsonReportWriter),
    }
}

impl TextReportWriter {
    fn write_entry(entry: &LogEntry, out: &mut dyn Write) -> std::io::Result<()> {
        let subject = entry.subject.as_ref().map(|s| s.name.as_str()).unwrap_or("-");
        match &entry.message {
            Some(message) => writeln!(out, "    [{}] {}: {}", entry.level, subject, message),
            None => writeln!(out, "    [{}] {}", entry.level, subject),
        }
    }
}

impl ReportWriter for TextReportWriter {
    fn write(&self, results: &[ReportResult], out: &mut dyn Write) -> Result<(), DomainError> {
        for report in results {
            let status = if report.failed { "failed" } else { "completed" };
            writeln!(out, "{} ({})", report.name, status)?;
            if !report.description.is_empty() {
                writeln!(out, "  {}", report.description)?;
            }

            for test in &report.tests {
                let c = &test.counts;
                writeln!(
                    out,
                    "  {}: {} success, {} info, {} warning, {} failure",
                    test.name, c.success, c.info, c.warning, c.failure
                )?;
                for entry in &test.entries {
                    Self::write_entry(entry, out)?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl ReportWriter for JsonReportWriter {
    fn write(&self, results: &[ReportResult], out: &mut dyn Write) -> Result<(), DomainError> {
        serde_json::to_writer_pretty(&mut *out, results)?;
        writeln!(out)?;
        Ok(())
    }
}
