// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Task graph and execution engine
//!
//! This module defines the core of lakeflow: the validated task graph,
//! the sequential executor, and the run records it produces.

mod executor;
mod graph;
mod report;
mod stage;

pub use executor::{ExecutionOptions, PipelineExecutor};
pub use graph::{TaskGraph, TaskGraphBuilder};
pub use report::{PipelineStatus, RunRecord, RunReport, StageOutcome};
pub use stage::{Stage, StageAction};
