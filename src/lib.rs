// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! # lakeflow - Batch Pipeline Orchestrator
//!
//! `lakeflow` runs a fixed set of named stages in dependency order, moving a
//! dataset through tiered data lake storage.
//!
//! ## Features
//!
//! - **Task graph** - Stages and their ordering constraints as a validated,
//!   acyclic graph with a deterministic execution order
//! - **Failure propagation** - A failed stage skips every transitive
//!   dependent; everything else still runs and every outcome is recorded
//! - **Run reports** - One record per stage plus a pipeline-level result,
//!   as console output or JSON
//!
//! ## Quick Start
//!
//! ```bash
//! # Create a starter configuration
//! lakeflow init
//!
//! # Check the pipeline definition
//! lakeflow validate
//!
//! # Execute the pipeline
//! lakeflow run
//!
//! # Render the task graph
//! lakeflow graph --format mermaid
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod pipeline;
pub mod tasks;

// Re-export commonly used types
pub use config::{PipelineConfig, TierPaths};
pub use errors::{LakeflowError, LakeflowResult};
pub use pipeline::{
    ExecutionOptions, PipelineExecutor, PipelineStatus, RunRecord, RunReport, StageAction,
    StageOutcome, TaskGraph, TaskGraphBuilder,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
