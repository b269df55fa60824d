// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! CLI command definitions and handlers
//!
//! Defines the command-line interface for lakeflow.

pub mod graph;
pub mod init;
pub mod run;
pub mod validate;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Batch pipeline orchestrator
///
/// Moves a dataset through the data lake tiers in dependency order.
#[derive(Parser, Debug)]
#[clap(
    name = "lakeflow",
    version,
    about = "Batch pipeline orchestrator for tiered data lake workflows",
    long_about = None,
    after_help = "Examples:\n\
        lakeflow init                   Create a starter configuration\n\
        lakeflow validate               Check the pipeline definition\n\
        lakeflow run                    Execute the pipeline\n\
        lakeflow graph --format dot     Render the task graph\n\n\
        See 'lakeflow <command> --help' for more information on a specific command."
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[clap(short, long, global = true)]
    pub verbose: bool,

    /// Change to directory before executing
    #[clap(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new lakeflow project
    Init {
        /// Overwrite an existing configuration
        #[clap(long)]
        force: bool,
    },

    /// Run the pipeline
    Run {
        /// Configuration file
        #[clap(short, long, default_value = "lakeflow.yaml")]
        config: PathBuf,

        /// Dry run (show the execution plan without running stages)
        #[clap(long)]
        dry_run: bool,

        /// Output format for the run report
        #[clap(short, long, value_enum, default_value = "text")]
        format: ReportFormat,
    },

    /// Validate the pipeline configuration
    Validate {
        /// Configuration file to validate
        #[clap(default_value = "lakeflow.yaml")]
        config: PathBuf,
    },

    /// Show the task graph
    Graph {
        /// Configuration file
        #[clap(default_value = "lakeflow.yaml")]
        config: PathBuf,

        /// Output format
        #[clap(short, long, value_enum, default_value = "text")]
        format: GraphFormat,
    },
}

/// Output format for the run command
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Graph output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphFormat {
    Text,
    Dot,
    Mermaid,
}
