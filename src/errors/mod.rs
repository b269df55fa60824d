// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Error types for pipeline construction and execution
//!
//! Structural problems (duplicate ids, unknown ids, cycles) are fatal to
//! starting a run and surface here. Stage execution failures are not errors;
//! they are recorded as data in the run report.

mod recovery;

pub use recovery::RecoverySuggestion;

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for lakeflow operations
pub type LakeflowResult<T> = Result<T, LakeflowError>;

/// Main error type for lakeflow
#[derive(Error, Debug, Diagnostic)]
pub enum LakeflowError {
    // ─────────────────────────────────────────────────────────────────────────
    // Graph Construction Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Stage '{stage}' is already declared")]
    #[diagnostic(
        code(lakeflow::duplicate_stage),
        help("Stage ids must be unique within a pipeline")
    )]
    DuplicateStage { stage: String },

    #[error("Dependency references unknown stage '{stage}'")]
    #[diagnostic(
        code(lakeflow::unknown_stage),
        help("Declare '{stage}' with add_stage before wiring dependencies to it")
    )]
    UnknownStage { stage: String },

    #[error("Dependency cycle detected: {}", path.join(" -> "))]
    #[diagnostic(
        code(lakeflow::cycle_detected),
        help("Review your stage dependencies to remove the cycle")
    )]
    CycleDetected { path: Vec<String> },

    // ─────────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Configuration file not found: {}", path.display())]
    #[diagnostic(
        code(lakeflow::config_not_found),
        help("Create a configuration with 'lakeflow init' or create lakeflow.yaml manually")
    )]
    ConfigNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────────────────
    // File Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("Failed to read file '{}': {error}", path.display())]
    #[diagnostic(code(lakeflow::file_read_error))]
    FileReadError { path: PathBuf, error: String },

    #[error("Failed to write file '{}': {error}", path.display())]
    #[diagnostic(code(lakeflow::file_write_error))]
    FileWriteError { path: PathBuf, error: String },

    // ─────────────────────────────────────────────────────────────────────────
    // IO/System Errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("IO error: {message}")]
    #[diagnostic(code(lakeflow::io_error))]
    Io { message: String },

    #[error("YAML parsing error: {message}")]
    #[diagnostic(code(lakeflow::yaml_error))]
    Yaml { message: String },

    #[error("JSON error: {message}")]
    #[diagnostic(code(lakeflow::json_error))]
    Json { message: String },
}

impl From<std::io::Error> for LakeflowError {
    fn from(e: std::io::Error) -> Self {
        Self::Io { message: e.to_string() }
    }
}

impl From<serde_yaml::Error> for LakeflowError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml { message: e.to_string() }
    }
}

impl From<serde_json::Error> for LakeflowError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json { message: e.to_string() }
    }
}
