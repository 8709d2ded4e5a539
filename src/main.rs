mod cli;
mod clipboard;
mod code_blocks;
mod config;
mod error;
mod file_scanner;
mod paths;
mod prompt;
mod repair;
mod selection;
mod state;
mod tree_builder;
mod tui;
mod walker;
mod workflow;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::RunConfig;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode> {
    // Daemon mode is an early exit and must come before argument parsing.
    if clipboard::check_and_run_daemon_if_requested()? {
        return Ok(ExitCode::SUCCESS);
    }

    let cli_args = Cli::parse();
    setup_tracing(&cli_args);
    debug!("Parsed CLI arguments: {cli_args:?}");

    let config = match RunConfig::from_cli(&cli_args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    workflow::run_batchyank(&config)?;
    Ok(ExitCode::SUCCESS)
}

fn setup_tracing(cli_args: &Cli) {
    if let Some(level) = cli_args.log_level.to_tracing_level() {
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .without_time()
            .compact()
            .init();
    }
}
