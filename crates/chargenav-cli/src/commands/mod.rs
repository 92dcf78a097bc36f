//! Command implementations

mod config;
mod estimate;
mod nearby;
mod route;

use crate::cli::{Cli, Commands};
use crate::config_loader::load_config;
use crate::output::OutputWriter;
use anyhow::Result;
use chargenav_session::Notice;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(cli.config.as_deref(), cli.vehicle.to_overrides())?;

    match cli.command {
        Commands::Nearby(args) => nearby::execute(args, &config, &output).await,
        Commands::Route(args) => route::execute(args, &config, &output).await,
        Commands::Estimate(args) => estimate::execute(args, &config, &output),
        Commands::Config => config::execute(&config, &output),
    }
}

/// Print recovered failures; JSON output carries them in the result instead
fn show_notices(notices: &[Notice], output: &OutputWriter) {
    if output.is_json() {
        return;
    }
    for notice in notices {
        output.warning(notice);
    }
}
