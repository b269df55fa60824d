// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Transform stage
//!
//! Produces the cleaned dataset in the processed tier.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use super::{CLEAN_DATASET, RAW_DATASET};
use crate::config::TierPaths;
use crate::pipeline::StageAction;

/// Copies the intake dataset into the processed tier as the cleaned copy
pub struct TransformTask {
    raw_dir: PathBuf,
    processed_dir: PathBuf,
}

impl TransformTask {
    pub fn new(tiers: &TierPaths) -> Self {
        Self {
            raw_dir: tiers.raw.clone(),
            processed_dir: tiers.processed.clone(),
        }
    }
}

#[async_trait]
impl StageAction for TransformTask {
    async fn execute(&self) -> Result<()> {
        let source = self.raw_dir.join(RAW_DATASET);
        let rows = fs::read_to_string(&source)
            .await
            .with_context(|| format!("failed to read '{}'", source.display()))?;

        fs::create_dir_all(&self.processed_dir).await.with_context(|| {
            format!(
                "failed to create processed tier '{}'",
                self.processed_dir.display()
            )
        })?;

        let target = self.processed_dir.join(CLEAN_DATASET);
        fs::write(&target, rows)
            .await
            .with_context(|| format!("failed to write '{}'", target.display()))?;

        debug!(path = %target.display(), "wrote cleaned dataset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::IngestTask;

    #[tokio::test]
    async fn test_transform_copies_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let tiers = TierPaths::under(dir.path());

        IngestTask::new(&tiers).execute().await.unwrap();
        TransformTask::new(&tiers).execute().await.unwrap();

        let raw = std::fs::read_to_string(tiers.raw.join(RAW_DATASET)).unwrap();
        let clean = std::fs::read_to_string(tiers.processed.join(CLEAN_DATASET)).unwrap();
        assert_eq!(raw, clean);
    }

    #[tokio::test]
    async fn test_transform_fails_without_source() {
        let dir = tempfile::tempdir().unwrap();
        let tiers = TierPaths::under(dir.path());

        let err = TransformTask::new(&tiers).execute().await.unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
