//! Devtrack CLI binary

use anyhow::{Context, Result};
use clap::Parser;
use devtrack_cli::{run, Cli};
use devtrack_core::{init_logging, load_config, SystemClock};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    config.logging = cli.logging_config(&config.logging);
    init_logging(&config.logging).context("Failed to initialize logging")?;

    let mut stdout = std::io::stdout();
    run(cli.command, &config, Arc::new(SystemClock), &mut stdout).await?;

    Ok(())
}
