// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Graph command - visualize the task graph

use miette::Result;
use std::path::PathBuf;

use super::GraphFormat;
use crate::config::PipelineConfig;
use crate::errors::LakeflowError;
use crate::tasks::sales_pipeline;

/// Run the graph command
pub async fn run(config_path: PathBuf, format: GraphFormat, _verbose: bool) -> Result<()> {
    if !config_path.exists() {
        return Err(LakeflowError::ConfigNotFound { path: config_path }.into());
    }

    let config = PipelineConfig::from_file(&config_path)?;
    let graph = sales_pipeline(&config)?;

    let output = match format {
        GraphFormat::Text => graph.to_text(),
        GraphFormat::Dot => graph.to_dot(),
        GraphFormat::Mermaid => graph.to_mermaid(),
    };

    println!("{}", output);

    Ok(())
}
