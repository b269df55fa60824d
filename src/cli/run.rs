// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Run command - execute the pipeline

use colored::Colorize;
use miette::Result;
use std::path::PathBuf;

use super::ReportFormat;
use crate::config::PipelineConfig;
use crate::errors::LakeflowError;
use crate::pipeline::{ExecutionOptions, PipelineExecutor, PipelineStatus, StageOutcome};
use crate::tasks::sales_pipeline;

/// Run the pipeline
pub async fn run(
    config_path: PathBuf,
    dry_run: bool,
    format: ReportFormat,
    verbose: bool,
) -> Result<()> {
    if !config_path.exists() {
        return Err(LakeflowError::ConfigNotFound { path: config_path }.into());
    }

    let config = PipelineConfig::from_file(&config_path)?;
    let graph = sales_pipeline(&config)?;

    let options = ExecutionOptions {
        dry_run,
        quiet: format == ReportFormat::Json,
        verbose,
    };

    let report = PipelineExecutor::new().run(&graph, &options).await;

    match format {
        ReportFormat::Json => {
            let json = serde_json::to_string_pretty(&report).map_err(LakeflowError::from)?;
            println!("{}", json);
        }
        ReportFormat::Text => {
            println!();
            match &report.status {
                PipelineStatus::Succeeded => {
                    println!(
                        "{}",
                        format!(
                            "Pipeline '{}' completed successfully in {:.2}s",
                            config.name,
                            report.duration.as_secs_f64()
                        )
                        .green()
                    );
                }
                PipelineStatus::PartiallyFailed { first_failed } => {
                    println!(
                        "{}",
                        format!(
                            "Pipeline '{}' failed after {:.2}s",
                            config.name,
                            report.duration.as_secs_f64()
                        )
                        .red()
                    );

                    if let Some(record) = report.record(first_failed) {
                        if let StageOutcome::Failed { reason } = &record.outcome {
                            eprintln!();
                            eprintln!("{}", format!("Stage '{}' failed:", first_failed).red().bold());
                            eprintln!("{}", reason.dimmed());
                        }
                    }
                }
            }
        }
    }

    if !report.succeeded() {
        return Err(miette::miette!("Pipeline execution failed"));
    }

    Ok(())
}
