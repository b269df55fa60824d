// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! lakeflow - Batch Pipeline Orchestrator
//!
//! Moves a dataset through the data lake tiers in dependency order.

use clap::Parser;
use miette::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lakeflow::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lakeflow=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();

    // Change to specified directory if provided
    if let Some(ref dir) = cli.directory {
        std::env::set_current_dir(dir).map_err(|e| {
            miette::miette!("Failed to change to directory '{}': {}", dir.display(), e)
        })?;
    }

    // Dispatch to command handlers
    match cli.command {
        Commands::Init { force } => lakeflow::cli::init::run(force, cli.verbose).await,
        Commands::Run {
            config,
            dry_run,
            format,
        } => lakeflow::cli::run::run(config, dry_run, format, cli.verbose).await,
        Commands::Validate { config } => lakeflow::cli::validate::run(config, cli.verbose).await,
        Commands::Graph { config, format } => {
            lakeflow::cli::graph::run(config, format, cli.verbose).await
        }
    }
}
