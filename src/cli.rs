use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DeviceStatus, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "netbox-reports")]
#[command(version, about = "Consistency reports for NetBox device inventories", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run reports (all of them if none are named)
    Run(RunArgs),

    /// List available reports and their tests
    List,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Reports to run, as `Report` or `Report.test`
    pub reports: Vec<String>,

    /// Read the inventory from a JSON snapshot instead of the NetBox API
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Output format: text or json
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Check devices with this status (repeatable; replaces the configured set)
    #[arg(long = "status")]
    pub statuses: Vec<DeviceStatus>,

    /// Exit with status 2 if any warning was logged
    #[arg(long)]
    pub fail_on_warning: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration (token redacted)
    Show,
}
