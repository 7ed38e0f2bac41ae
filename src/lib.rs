#![forbid(unsafe_code)]

pub mod adapters;
pub mod app;
pub mod cli;
pub mod commands;
pub mod domain;
pub mod infrastructure;
pub mod ports;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;

/// Parse the command line and run it on a single-threaded runtime.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(commands::execute(cli)) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Aborted");
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
