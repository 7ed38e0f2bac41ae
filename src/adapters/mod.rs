pub mod config_store;
pub mod http_client;
pub mod memory;
pub mod netbox;
pub mod report_writer;
pub mod sink;

pub use config_store::TomlConfigStore;
pub use http_client::ReqwestClient;
pub use memory::{InMemoryInventory, Snapshot};
pub use netbox::NetBoxInventory;
pub use report_writer::{writer_for, JsonReportWriter, TextReportWriter};
pub use sink::MemorySink;
