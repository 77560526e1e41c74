//! Main Entrypoint for the `tutor` command.
//!
//! Loads configuration, installs logging on stderr so that stdout carries only
//! rendered output, and runs the requested command.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tutor_cli::{app, cli::Cli, config::Config};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
    info!(command = ?cli.command, "Configuration loaded");

    // --- 3. Run ---
    app::run(cli, config).await
}
