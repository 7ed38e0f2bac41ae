use std::sync::Arc;

use tracing::{info, info_span, Instrument};

use crate::adapters::MemorySink;
use crate::app::checks::CheckContext;
use crate::app::report::{Report, Selection};
use crate::domain::config::ChecksConfig;
use crate::domain::{DomainError, ReportResult, TestResult};
use crate::ports::InventoryRepository;

/// Runs reports against an inventory, one test at a time.
pub struct ReportRunner {
    inventory: Arc<dyn InventoryRepository>,
    settings: ChecksConfig,
}

impl ReportRunner {
    pub fn new(inventory: Arc<dyn InventoryRepository>, settings: ChecksConfig) -> Self {
        Self {
            inventory,
            settings,
        }
    }

    /// Run the tests of `report`, or only `only` if given.
    pub async fn run(&self, report: &Report, only: Option<&str>) -> Result<ReportResult, DomainError> {
        let ctx = CheckContext {
            inventory: self.inventory.as_ref(),
            settings: &self.settings,
        };

        let mut tests = Vec::new();
        for check in &report.checks {
            if only.is_some_and(|name| name != check.name()) {
                continue;
            }

            let sink = MemorySink::new(report.name, check.name());
            check
                .run(&ctx, &sink)
                .instrument(info_span!("test", report = report.name, test = check.name()))
                .await?;

            let result = TestResult::new(check.name(), sink.into_entries());
            info!(
                report = report.name,
                test = check.name(),
                success = result.counts.success,
                warning = result.counts.warning,
                failure = result.counts.failure,
                "Test finished"
            );
            tests.push(result);
        }

        Ok(ReportResult::new(report.name, report.description, tests))
    }

    /// Run every selection in order. The first error aborts the run.
    pub async fn run_selected(
        &self,
        reports: &[Report],
        selections: &[Selection],
    ) -> Result<Vec<ReportResult>, DomainError> {
        let mut results = Vec::with_capacity(selections.len());
        for selection in selections {
            let report = reports
                .iter()
                .find(|r| r.name == selection.report)
                .ok_or_else(|| DomainError::UnknownReport(selection.report.clone()))?;
            results.push(self.run(report, selection.test.as_deref()).await?);
        }
        Ok(results)
    }
}
