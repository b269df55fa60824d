// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Report stage

use anyhow::Result;
use async_trait::async_trait;
use tracing::info;

use crate::pipeline::StageAction;

/// Announces that the curated dataset is ready for analytics
pub struct ReportTask;

impl ReportTask {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ReportTask {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StageAction for ReportTask {
    async fn execute(&self) -> Result<()> {
        info!("data ready for BI / machine learning");
        Ok(())
    }
}
