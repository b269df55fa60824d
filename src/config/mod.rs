// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Pipeline configuration
//!
//! Defines the schema for lakeflow.yaml: the storage tier locations the
//! domain stages read from and write to. The config value is passed into
//! the pipeline definition entry point; nothing is defined at module scope.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::LakeflowError;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "lakeflow.yaml";

/// Pipeline configuration from lakeflow.yaml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name
    #[serde(default = "default_name")]
    pub name: String,

    /// Pipeline description
    #[serde(default)]
    pub description: Option<String>,

    /// Storage tier locations
    #[serde(default)]
    pub tiers: TierPaths,
}

fn default_name() -> String {
    "sales-pipeline".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: None,
            tiers: TierPaths::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, LakeflowError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| LakeflowError::FileReadError {
                path: path.to_path_buf(),
                error: e.to_string(),
            })?;

        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, LakeflowError> {
        serde_yaml::from_str(yaml).map_err(Into::into)
    }

    /// Serialize configuration to YAML
    pub fn to_yaml(&self) -> Result<String, LakeflowError> {
        serde_yaml::to_string(self).map_err(Into::into)
    }
}

/// Storage tier locations
///
/// The raw tier receives the intake dataset, the processed tier the cleaned
/// copy, and the curated tier the final dataset handed to analytics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierPaths {
    /// Raw intake tier
    #[serde(default = "default_raw")]
    pub raw: PathBuf,

    /// Processed/cleaned tier
    #[serde(default = "default_processed")]
    pub processed: PathBuf,

    /// Curated tier
    #[serde(default = "default_curated")]
    pub curated: PathBuf,
}

impl Default for TierPaths {
    fn default() -> Self {
        Self {
            raw: default_raw(),
            processed: default_processed(),
            curated: default_curated(),
        }
    }
}

fn default_raw() -> PathBuf {
    PathBuf::from("data/raw")
}

fn default_processed() -> PathBuf {
    PathBuf::from("data/processed")
}

fn default_curated() -> PathBuf {
    PathBuf::from("data/curated")
}

impl TierPaths {
    /// All tiers as (name, path) pairs, in flow order
    pub fn entries(&self) -> [(&'static str, &Path); 3] {
        [
            ("raw", self.raw.as_path()),
            ("processed", self.processed.as_path()),
            ("curated", self.curated.as_path()),
        ]
    }

    /// Re-root every tier under a base directory
    pub fn under(base: &Path) -> Self {
        Self {
            raw: base.join("raw"),
            processed: base.join("processed"),
            curated: base.join("curated"),
        }
    }
}
