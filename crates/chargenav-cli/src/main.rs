//! Chargenav CLI - Command-line interface
//!
//! Ranks nearby charging stations, fetches routes and estimates trips from
//! the terminal.

mod cli;
mod commands;
mod config_loader;
mod errors;
mod output;
mod output_types;
mod session;

use clap::Parser;
use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Create async runtime
    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            errors::from_anyhow(e.into()).display();
            return ExitCode::FAILURE;
        }
    };

    // Execute the command
    match runtime.block_on(async { commands::execute(cli).await }) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast::<errors::CliError>() {
                Ok(cli_error) => cli_error.display(),
                Err(other) => errors::from_anyhow(other).display(),
            }
            ExitCode::FAILURE
        }
    }
}
