// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Validate stage
//!
//! Confirms the intake dataset landed before downstream stages touch it.

use anyhow::{bail, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use super::RAW_DATASET;
use crate::config::TierPaths;
use crate::pipeline::StageAction;

/// Checks that the raw tier holds the intake dataset
pub struct ValidateTask {
    raw_dir: PathBuf,
}

impl ValidateTask {
    pub fn new(tiers: &TierPaths) -> Self {
        Self {
            raw_dir: tiers.raw.clone(),
        }
    }
}

#[async_trait]
impl StageAction for ValidateTask {
    async fn execute(&self) -> Result<()> {
        let source = self.raw_dir.join(RAW_DATASET);

        if !fs::try_exists(&source).await? {
            bail!("missing data");
        }

        debug!(path = %source.display(), "intake dataset present");
        Ok(())
    }
}
