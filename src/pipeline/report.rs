// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Run records and pipeline-level results
//!
//! One record per declared stage, in execution order. Records are produced
//! by the executor during a run and never mutated afterward.

use serde::Serialize;
use std::time::Duration;

/// Terminal outcome of one stage for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StageOutcome {
    /// The action ran to completion
    Succeeded,
    /// The action reported a failure; `reason` carries its message verbatim
    Failed { reason: String },
    /// Execution was suppressed because an upstream stage failed
    Skipped { upstream_failure: String },
}

impl StageOutcome {
    /// Whether this outcome blocks dependents from running
    pub fn blocks_dependents(&self) -> bool {
        !matches!(self, Self::Succeeded)
    }
}

/// The recorded outcome of one stage for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunRecord {
    /// Stage id
    pub stage: String,
    /// Terminal outcome
    #[serde(flatten)]
    pub outcome: StageOutcome,
}

/// Pipeline-level result of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PipelineStatus {
    /// Every stage succeeded
    Succeeded,
    /// At least one stage failed; `first_failed` is the earliest failure
    /// in execution order
    PartiallyFailed { first_failed: String },
}

/// Result of executing a pipeline
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// One record per declared stage, in execution order
    pub records: Vec<RunRecord>,
    /// Pipeline-level result
    #[serde(flatten)]
    pub status: PipelineStatus,
    /// Total execution time
    #[serde(skip)]
    pub duration: Duration,
}

impl RunReport {
    pub(crate) fn from_records(records: Vec<RunRecord>, duration: Duration) -> Self {
        let first_failed = records
            .iter()
            .find(|r| matches!(r.outcome, StageOutcome::Failed { .. }))
            .map(|r| r.stage.clone());

        let status = match first_failed {
            Some(stage) => PipelineStatus::PartiallyFailed {
                first_failed: stage,
            },
            None => PipelineStatus::Succeeded,
        };

        Self {
            records,
            status,
            duration,
        }
    }

    /// Whether every stage succeeded
    pub fn succeeded(&self) -> bool {
        matches!(self.status, PipelineStatus::Succeeded)
    }

    /// Look up the record for a stage
    pub fn record(&self, stage: &str) -> Option<&RunRecord> {
        self.records.iter().find(|r| r.stage == stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_records() {
        let report = RunReport::from_records(
            vec![
                RunRecord {
                    stage: "a".into(),
                    outcome: StageOutcome::Succeeded,
                },
                RunRecord {
                    stage: "b".into(),
                    outcome: StageOutcome::Failed {
                        reason: "boom".into(),
                    },
                },
                RunRecord {
                    stage: "c".into(),
                    outcome: StageOutcome::Skipped {
                        upstream_failure: "b".into(),
                    },
                },
            ],
            Duration::ZERO,
        );

        assert!(!report.succeeded());
        assert_eq!(
            report.status,
            PipelineStatus::PartiallyFailed {
                first_failed: "b".into()
            }
        );
    }

    #[test]
    fn test_empty_run_succeeds() {
        let report = RunReport::from_records(vec![], Duration::ZERO);
        assert!(report.succeeded());
    }

    #[test]
    fn test_json_shape() {
        let report = RunReport::from_records(
            vec![RunRecord {
                stage: "ingest".into(),
                outcome: StageOutcome::Succeeded,
            }],
            Duration::ZERO,
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "succeeded");
        assert_eq!(json["records"][0]["stage"], "ingest");
        assert_eq!(json["records"][0]["outcome"], "succeeded");
    }
}
