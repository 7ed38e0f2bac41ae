pub mod checks;
pub mod controller;
pub mod report;
pub mod runner;

pub use checks::{Check, CheckContext};
pub use controller::AppController;
pub use report::{builtin_reports, select, Report, Selection};
pub use runner::ReportRunner;
