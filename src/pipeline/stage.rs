// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Stage definitions
//!
//! A stage is a named unit of work. The action behind it is opaque to the
//! engine: it either completes, or reports a failure reason.

use async_trait::async_trait;
use std::fmt;

/// The contract between the engine and a unit of work.
///
/// Actions take no arguments; anything a stage needs (tier locations, file
/// names) is a field of the implementing struct. The executor awaits each
/// action to completion before moving on, so a non-returning action blocks
/// the pipeline indefinitely — there is no timeout or cancellation.
#[async_trait]
pub trait StageAction: Send + Sync {
    /// Perform the stage's work.
    ///
    /// `Ok(())` marks the stage `Succeeded`. Any error marks it `Failed`,
    /// with the error's message recorded verbatim as the failure reason.
    async fn execute(&self) -> anyhow::Result<()>;
}

/// A named unit of work in the pipeline.
pub struct Stage {
    /// Stage id (unique within a task graph)
    pub id: String,
    /// The work itself; never inspected by the engine
    pub(crate) action: Box<dyn StageAction>,
}

impl Stage {
    pub(crate) fn new(id: impl Into<String>, action: Box<dyn StageAction>) -> Self {
        Self {
            id: id.into(),
            action,
        }
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage").field("id", &self.id).finish()
    }
}
