pub mod config;
pub mod http;
pub mod inventory;
pub mod output;

pub use config::ConfigStore;
pub use http::HttpClient;
pub use inventory::InventoryRepository;
pub use output::{ReportWriter, ResultSink};
