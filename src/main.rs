//! Position size calculator CLI application.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use sizer_config::load_config;
use sizer_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::ValidateConfig = cli.command {
        return cli::commands::validate::run(&cli.config);
    }

    let config = load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    // Setup logging
    let log_level = cli
        .log_level
        .map(|l| l.as_str().to_string())
        .unwrap_or_else(|| config.logging.level.clone());
    let _log_guard = setup_logging(
        &log_level,
        cli.json_logs || config.logging.is_json(),
        config.logging.file.as_deref(),
    );

    // Execute command
    match cli.command {
        Commands::Price(args) => cli::commands::price::run(args, &config, cli.output).await,
        Commands::Percent(args) => cli::commands::percent::run(args, &config, cli.output).await,
        Commands::Quote(args) => cli::commands::quote::run(args, &config, cli.output).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config),
    }
}
