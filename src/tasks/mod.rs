// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Domain stage actions
//!
//! The five observed stages of the sales pipeline, each an opaque action
//! from the engine's point of view, plus the entry point that wires them
//! into a task graph.

mod ingest;
mod load;
mod report;
mod transform;
mod validate;

pub use ingest::IngestTask;
pub use load::LoadTask;
pub use report::ReportTask;
pub use transform::TransformTask;
pub use validate::ValidateTask;

use crate::config::PipelineConfig;
use crate::errors::LakeflowResult;
use crate::pipeline::TaskGraph;

/// Dataset file name in the raw tier
pub const RAW_DATASET: &str = "sales.csv";
/// Dataset file name in the processed tier
pub const CLEAN_DATASET: &str = "sales_clean.csv";
/// Dataset file name in the curated tier
pub const CURATED_DATASET: &str = "sales_curated.csv";

/// Build the sales pipeline task graph
///
/// Registers the five stages in declaration order, then wires the linear
/// chain ingest -> validate -> transform -> load -> report.
pub fn sales_pipeline(config: &PipelineConfig) -> LakeflowResult<TaskGraph> {
    let tiers = &config.tiers;

    let mut builder = TaskGraph::builder();
    builder.add_stage("ingest", Box::new(IngestTask::new(tiers)))?;
    builder.add_stage("validate", Box::new(ValidateTask::new(tiers)))?;
    builder.add_stage("transform", Box::new(TransformTask::new(tiers)))?;
    builder.add_stage("load", Box::new(LoadTask::new(tiers)))?;
    builder.add_stage("report", Box::new(ReportTask::new()))?;

    builder.add_dependency("ingest", "validate")?;
    builder.add_dependency("validate", "transform")?;
    builder.add_dependency("transform", "load")?;
    builder.add_dependency("load", "report")?;

    builder.validate()
}
