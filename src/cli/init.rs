// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Init command - create a new lakeflow project

use colored::Colorize;
use miette::Result;
use std::path::Path;

use crate::config::{PipelineConfig, DEFAULT_CONFIG_FILE};

/// Run the init command
pub async fn run(force: bool, verbose: bool) -> Result<()> {
    println!("{}", "Initializing lakeflow project...".bold());
    println!();

    if Path::new(DEFAULT_CONFIG_FILE).exists() && !force {
        return Err(miette::miette!(
            "{} already exists. Use --force to overwrite.",
            DEFAULT_CONFIG_FILE
        ));
    }

    let content = starter_config();
    std::fs::write(DEFAULT_CONFIG_FILE, &content).map_err(|e| {
        miette::miette!("Failed to write {}: {}", DEFAULT_CONFIG_FILE, e)
    })?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_FILE);

    // Create the tier directories up front so permissions fail early.
    let config = PipelineConfig::from_yaml(&content)?;
    for (_, dir) in config.tiers.entries() {
        if !dir.exists() {
            std::fs::create_dir_all(dir).map_err(|e| {
                miette::miette!("Failed to create directory '{}': {}", dir.display(), e)
            })?;
            println!("  {} Created {}/", "✓".green(), dir.display());
        }
    }

    println!();
    println!("{}", "Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit {} to adjust the storage tier locations",
        DEFAULT_CONFIG_FILE.cyan()
    );
    println!("  2. Run {} to execute the pipeline", "lakeflow run".cyan());
    println!();

    if verbose {
        println!("{}", "Generated configuration:".dimmed());
        println!("{}", "─".repeat(50).dimmed());
        println!("{}", content.dimmed());
    }

    Ok(())
}

fn starter_config() -> String {
    "\
# lakeflow pipeline configuration

name: \"sales-pipeline\"
description: \"Move the sales dataset through the data lake tiers\"

# Storage tier locations. Relative paths resolve against the working
# directory lakeflow runs in.
tiers:
  raw: data/raw
  processed: data/processed
  curated: data/curated
"
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_config_parses() {
        let config = PipelineConfig::from_yaml(&starter_config()).unwrap();
        assert_eq!(config.name, "sales-pipeline");
        assert_eq!(config.tiers.raw, std::path::PathBuf::from("data/raw"));
    }
}
