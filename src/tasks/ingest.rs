// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Ingest stage
//!
//! Lands the intake dataset in the raw tier.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use super::RAW_DATASET;
use crate::config::TierPaths;
use crate::pipeline::StageAction;

/// Seed rows for the intake dataset
const SEED_ROWS: &str = "client,amount\nA,100\nB,200\nA,150\nC,300";

/// Writes the intake dataset into the raw tier
pub struct IngestTask {
    raw_dir: PathBuf,
}

impl IngestTask {
    pub fn new(tiers: &TierPaths) -> Self {
        Self {
            raw_dir: tiers.raw.clone(),
        }
    }
}

#[async_trait]
impl StageAction for IngestTask {
    async fn execute(&self) -> Result<()> {
        fs::create_dir_all(&self.raw_dir)
            .await
            .with_context(|| format!("failed to create raw tier '{}'", self.raw_dir.display()))?;

        let target = self.raw_dir.join(RAW_DATASET);
        fs::write(&target, SEED_ROWS)
            .await
            .with_context(|| format!("failed to write '{}'", target.display()))?;

        debug!(path = %target.display(), "landed intake dataset in raw tier");
        Ok(())
    }
}
