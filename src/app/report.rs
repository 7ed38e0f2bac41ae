use crate::app::checks::{Check, InterfaceConnectionCheck, InterfaceCountCheck, InterfaceNameCheck};
use crate::domain::DomainError;

/// A named group of checks that run together.
pub struct Report {
    pub name: &'static str,
    pub description: &'static str,
    pub checks: Vec<Box<dyn Check>>,
}

impl Report {
    pub fn check(&self, name: &str) -> Option<&dyn Check> {
        self.checks.iter().find(|c| c.name() == name).map(|c| &**c)
    }

    pub fn test_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }
}

/// All registered reports, in run order.
pub fn builtin_reports() -> Vec<Report> {
    vec![
        Report {
            name: "DeviceAndTemplate",
            description: "Check for differences in the template and corresponding devices",
            checks: vec![Box::new(InterfaceCountCheck), Box::new(InterfaceNameCheck)],
        },
        Report {
            name: "InterfaceConnection",
            description: "Check for physical interface connections that are not connected",
            checks: vec![Box::new(InterfaceConnectionCheck)],
        },
    ]
}

/// A report to run, optionally restricted to one test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub report: String,
    pub test: Option<String>,
}

impl Selection {
    /// Parse `Report` or `Report.test`.
    pub fn parse(spec: &str) -> Self {
        match spec.split_once('.') {
            Some((report, test)) => Self {
                report: report.to_string(),
                test: Some(test.to_string()),
            },
            None => Self {
                report: spec.to_string(),
                test: None,
            },
        }
    }

    /// Check the selection against the registered reports.
    pub fn validate(&self, reports: &[Report]) -> Result<(), DomainError> {
        let report = reports
            .iter()
            .find(|r| r.name == self.report)
            .ok_or_else(|| DomainError::UnknownReport(self.report.clone()))?;

        if let Some(test) = &self.test {
            if report.check(test).is_none() {
                return Err(DomainError::UnknownTest {
                    report: self.report.clone(),
                    test: test.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Turn CLI arguments into selections. No arguments selects every report.
pub fn select(specs: &[String], reports: &[Report]) -> Result<Vec<Selection>, DomainError> {
    if specs.is_empty() {
        return Ok(reports
            .iter()
            .map(|r| Selection {
                report: r.name.to_string(),
                test: None,
            })
            .collect());
    }

    specs
        .iter()
        .map(|spec| {
            let selection = Selection::parse(spec);
            selection.validate(reports)?;
            Ok(selection)
        })
        .collect()
}
