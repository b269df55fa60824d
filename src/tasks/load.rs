// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Load stage
//!
//! Publishes the cleaned dataset into the curated tier.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

use super::{CLEAN_DATASET, CURATED_DATASET};
use crate::config::TierPaths;
use crate::pipeline::StageAction;

/// Copies the cleaned dataset into the curated tier
pub struct LoadTask {
    processed_dir: PathBuf,
    curated_dir: PathBuf,
}

impl LoadTask {
    pub fn new(tiers: &TierPaths) -> Self {
        Self {
            processed_dir: tiers.processed.clone(),
            curated_dir: tiers.curated.clone(),
        }
    }
}

#[async_trait]
impl StageAction for LoadTask {
    async fn execute(&self) -> Result<()> {
        let source = self.processed_dir.join(CLEAN_DATASET);
        let rows = fs::read_to_string(&source)
            .await
            .with_context(|| format!("failed to read '{}'", source.display()))?;

        fs::create_dir_all(&self.curated_dir).await.with_context(|| {
            format!(
                "failed to create curated tier '{}'",
                self.curated_dir.display()
            )
        })?;

        let target = self.curated_dir.join(CURATED_DATASET);
        fs::write(&target, rows)
            .await
            .with_context(|| format!("failed to write '{}'", target.display()))?;

        debug!(path = %target.display(), "published curated dataset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{IngestTask, TransformTask};

    #[tokio::test]
    async fn test_load_publishes_curated_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let tiers = TierPaths::under(dir.path());

        IngestTask::new(&tiers).execute().await.unwrap();
        TransformTask::new(&tiers).execute().await.unwrap();
        LoadTask::new(&tiers).execute().await.unwrap();

        let clean = std::fs::read_to_string(tiers.processed.join(CLEAN_DATASET)).unwrap();
        let curated = std::fs::read_to_string(tiers.curated.join(CURATED_DATASET)).unwrap();
        assert_eq!(clean, curated);
    }

    #[tokio::test]
    async fn test_load_fails_without_cleaned_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let tiers = TierPaths::under(dir.path());

        let err = LoadTask::new(&tiers).execute().await.unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
