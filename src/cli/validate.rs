// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Validate command - check pipeline configuration

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::errors::{LakeflowError, RecoverySuggestion};
use crate::tasks::sales_pipeline;

/// Run the validate command
pub async fn run(config_path: PathBuf, verbose: bool) -> Result<()> {
    println!("{}", "Validating pipeline...".bold());
    println!();

    if !config_path.exists() {
        eprintln!("  {} Configuration file not found", "✗".red());
        let suggestion = RecoverySuggestion::create_config(&config_path.display().to_string());
        eprint!("{}", suggestion.to_text());
        return Err(LakeflowError::ConfigNotFound { path: config_path }.into());
    }

    let config = match PipelineConfig::from_file(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("  {} Failed to parse configuration", "✗".red());
            return Err(e.into());
        }
    };
    println!("  {} Configuration file is valid YAML", "✓".green());

    let graph = match sales_pipeline(&config) {
        Ok(graph) => {
            println!(
                "  {} Task graph is acyclic ({} stages)",
                "✓".green(),
                graph.len()
            );
            graph
        }
        Err(e) => {
            eprintln!("  {} {}", "✗".red(), e);
            if let LakeflowError::CycleDetected { path } = &e {
                eprint!("{}", RecoverySuggestion::fix_cycle(path).to_text());
            }
            return Err(e.into());
        }
    };

    // Missing tier directories are warnings: the stages create the ones they
    // write to on demand.
    let missing: Vec<_> = config
        .tiers
        .entries()
        .into_iter()
        .filter(|(_, dir)| !dir.exists())
        .map(|(tier, dir)| (tier, dir.to_path_buf()))
        .collect();

    if !missing.is_empty() {
        println!();
        println!("{}:", "Warnings".yellow().bold());
        for (tier, dir) in &missing {
            println!(
                "  {} {} tier directory '{}' does not exist yet",
                "⚠".yellow(),
                tier,
                dir.display()
            );
        }
        if verbose {
            println!();
            for (tier, dir) in &missing {
                print!(
                    "{}",
                    RecoverySuggestion::create_tier_dir(tier, &dir.display().to_string()).to_text()
                );
            }
        }
    }

    if verbose {
        println!();
        println!("{}:", "Execution order".bold());
        for line in graph.to_text().lines() {
            println!("  {}", line);
        }
    }

    println!();
    println!("{}", "Pipeline is valid!".green().bold());

    Ok(())
}
