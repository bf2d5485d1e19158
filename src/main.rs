// Archive Report - Archive code parsing and CSV report export
// Copyright (c) 2025 Archive Report Contributors
// Licensed under the MIT License

use archive_report::cli::{Cli, Commands, EXIT_CONFIG_ERROR, EXIT_FATAL};
use archive_report::config::load_config_or_default;
use archive_report::logging::init_logging;
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Commands report configuration errors themselves; logging only needs a
    // best-effort view of the file here
    let config = load_config_or_default(&cli.config).unwrap_or_default();
    let log_level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.application.log_level.clone());

    let guard = match init_logging(&log_level, &config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_CONFIG_ERROR);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Archive Report - archive code parsing and CSV report export"
    );

    let exit_code = match execute_command(&cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    // process::exit skips destructors
    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::Export(args) => args.execute(&cli.config).await,
        Commands::Parse(args) => args.execute().await,
        Commands::Fields(args) => args.execute().await,
        Commands::Templates(args) => args.execute().await,
        Commands::Stats(args) => args.execute(&cli.config).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
