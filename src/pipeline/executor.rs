// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Pipeline executor
//!
//! Runs stages sequentially in dependency order, records every outcome, and
//! suppresses work downstream of a failure.

use std::time::Instant;

use colored::Colorize;
use tracing::{debug, info, warn};

use crate::pipeline::graph::TaskGraph;
use crate::pipeline::report::{RunRecord, RunReport, StageOutcome};

/// Pipeline execution options
#[derive(Debug, Clone, Default)]
pub struct ExecutionOptions {
    /// Only show what would be done
    pub dry_run: bool,
    /// Suppress console output (tracing events are still emitted)
    pub quiet: bool,
    /// Echo failure reasons inline
    pub verbose: bool,
}

/// Pipeline executor
///
/// Stages run one at a time in topological order; independent stages are
/// not parallelized. A stage failure is never an executor error: it is
/// recorded, and every transitive dependent is recorded as skipped without
/// its action being invoked.
pub struct PipelineExecutor;

impl PipelineExecutor {
    /// Create a new pipeline executor
    pub fn new() -> Self {
        Self
    }

    /// Execute a pipeline
    ///
    /// Returns one record per declared stage plus the pipeline-level result.
    /// Always completes: stage-level failure information is returned, not
    /// thrown.
    pub async fn run(&self, graph: &TaskGraph, options: &ExecutionOptions) -> RunReport {
        let start = Instant::now();
        let order = graph.topo_indices();

        if !options.quiet {
            self.print_execution_plan(graph, &order);
        }

        if options.dry_run {
            return RunReport::from_records(Vec::new(), start.elapsed());
        }

        // Per-stage outcomes, indexed by declaration order.
        let mut outcomes: Vec<Option<StageOutcome>> = vec![None; graph.len()];
        let mut records = Vec::with_capacity(graph.len());

        for idx in order {
            let stage = graph.stage(idx);

            // Earliest-declared predecessor with a blocking outcome, if any.
            let blocking = graph.predecessors(idx).into_iter().find(|&pred| {
                outcomes[pred]
                    .as_ref()
                    .map(StageOutcome::blocks_dependents)
                    .unwrap_or(false)
            });

            let outcome = match blocking {
                Some(pred) => {
                    // Propagate the root failure, not the immediate skip.
                    let upstream = match outcomes[pred].as_ref() {
                        Some(StageOutcome::Skipped { upstream_failure }) => {
                            upstream_failure.clone()
                        }
                        _ => graph.stage(pred).id.clone(),
                    };

                    warn!(stage = %stage.id, upstream = %upstream, "skipping after upstream failure");
                    if !options.quiet {
                        println!(
                            "  {} {} {}",
                            "○".dimmed(),
                            stage.id.dimmed(),
                            format!("(skipped after {})", upstream).dimmed()
                        );
                    }

                    StageOutcome::Skipped {
                        upstream_failure: upstream,
                    }
                }
                None => {
                    debug!(stage = %stage.id, "dispatching stage action");
                    if !options.quiet {
                        print!("  {} {}...", "→".blue(), stage.id);
                    }

                    let stage_start = Instant::now();
                    match stage.action.execute().await {
                        Ok(()) => {
                            info!(stage = %stage.id, "stage completed");
                            if !options.quiet {
                                println!(
                                    "\r  {} {} ({:.2}s)",
                                    "✓".green(),
                                    stage.id.bold(),
                                    stage_start.elapsed().as_secs_f64()
                                );
                            }
                            StageOutcome::Succeeded
                        }
                        Err(e) => {
                            let reason = e.to_string();
                            warn!(stage = %stage.id, reason = %reason, "stage failed");
                            if !options.quiet {
                                println!("\r  {} {} failed", "✗".red(), stage.id.bold());
                                if options.verbose {
                                    eprintln!("{}", reason.dimmed());
                                }
                            }
                            StageOutcome::Failed { reason }
                        }
                    }
                }
            };

            outcomes[idx] = Some(outcome.clone());
            records.push(RunRecord {
                stage: stage.id.clone(),
                outcome,
            });
        }

        RunReport::from_records(records, start.elapsed())
    }

    /// Print the execution plan
    fn print_execution_plan(&self, graph: &TaskGraph, order: &[usize]) {
        println!();
        println!(
            "{} ({} stage{}):",
            "Execution plan".bold(),
            order.len(),
            if order.len() == 1 { "" } else { "s" }
        );
        println!("{}", "═".repeat(50));

        for (i, &idx) in order.iter().enumerate() {
            let stage = graph.stage(idx);
            let deps = graph.dependencies_of(&stage.id).unwrap_or_default();

            print!("  {}. {}", i + 1, stage.id.bold());
            if !deps.is_empty() {
                print!(" {}", format!("[depends: {}]", deps.join(", ")).dimmed());
            }
            println!();
        }

        println!();
    }
}

impl Default for PipelineExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::report::PipelineStatus;
    use crate::pipeline::stage::StageAction;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct ProbeAction {
        fail_with: Option<&'static str>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl StageAction for ProbeAction {
        async fn execute(&self) -> anyhow::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail_with {
                Some(reason) => anyhow::bail!("{}", reason),
                None => Ok(()),
            }
        }
    }

    fn probe(calls: &Arc<AtomicUsize>, fail_with: Option<&'static str>) -> Box<dyn StageAction> {
        Box::new(ProbeAction {
            fail_with,
            calls: Arc::clone(calls),
        })
    }

    fn counters(n: usize) -> Vec<Arc<AtomicUsize>> {
        (0..n).map(|_| Arc::new(AtomicUsize::new(0))).collect()
    }

    fn quiet() -> ExecutionOptions {
        ExecutionOptions {
            quiet: true,
            ..Default::default()
        }
    }

    fn chain(
        ids: &[&str],
        calls: &[Arc<AtomicUsize>],
        fail: Option<(&str, &'static str)>,
    ) -> TaskGraph {
        let mut builder = TaskGraph::builder();
        for (id, count) in ids.iter().zip(calls) {
            let fail_with = fail.and_then(|(stage, reason)| (stage == *id).then_some(reason));
            builder.add_stage(*id, probe(count, fail_with)).unwrap();
        }
        for pair in ids.windows(2) {
            builder.add_dependency(pair[0], pair[1]).unwrap();
        }
        builder.validate().unwrap()
    }

    const STAGES: [&str; 5] = ["ingest", "validate", "transform", "load", "report"];

    #[tokio::test]
    async fn test_all_stages_succeed() {
        let calls = counters(5);
        let graph = chain(&STAGES, &calls, None);

        let report = PipelineExecutor::new().run(&graph, &quiet()).await;

        assert_eq!(report.status, PipelineStatus::Succeeded);
        assert_eq!(report.records.len(), 5);
        for record in &report.records {
            assert_eq!(record.outcome, StageOutcome::Succeeded);
        }
        for count in &calls {
            assert_eq!(count.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_failure_skips_all_dependents() {
        let calls = counters(5);
        let graph = chain(&STAGES, &calls, Some(("validate", "missing data")));

        let report = PipelineExecutor::new().run(&graph, &quiet()).await;

        assert_eq!(
            report.status,
            PipelineStatus::PartiallyFailed {
                first_failed: "validate".into()
            }
        );
        assert_eq!(
            report.record("ingest").unwrap().outcome,
            StageOutcome::Succeeded
        );
        assert_eq!(
            report.record("validate").unwrap().outcome,
            StageOutcome::Failed {
                reason: "missing data".into()
            }
        );
        // Transitive dependents all point at the root failure.
        for skipped in ["transform", "load", "report"] {
            assert_eq!(
                report.record(skipped).unwrap().outcome,
                StageOutcome::Skipped {
                    upstream_failure: "validate".into()
                }
            );
        }

        // Skipped actions were never invoked.
        assert_eq!(calls[0].load(Ordering::SeqCst), 1);
        assert_eq!(calls[1].load(Ordering::SeqCst), 1);
        for count in &calls[2..] {
            assert_eq!(count.load(Ordering::SeqCst), 0);
        }
    }

    #[tokio::test]
    async fn test_diamond_join_runs_after_both_branches() {
        let calls = counters(3);
        let mut builder = TaskGraph::builder();
        builder.add_stage("a", probe(&calls[0], None)).unwrap();
        builder.add_stage("b", probe(&calls[1], None)).unwrap();
        builder.add_stage("c", probe(&calls[2], None)).unwrap();
        builder.add_dependency("a", "c").unwrap();
        builder.add_dependency("b", "c").unwrap();
        let graph = builder.validate().unwrap();

        let report = PipelineExecutor::new().run(&graph, &quiet()).await;

        assert_eq!(report.status, PipelineStatus::Succeeded);
        let order: Vec<&str> = report.records.iter().map(|r| r.stage.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(calls[2].load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failure_leaves_independent_stages_untouched() {
        let calls = counters(4);
        let mut builder = TaskGraph::builder();
        builder
            .add_stage("a", probe(&calls[0], Some("boom")))
            .unwrap();
        builder.add_stage("b", probe(&calls[1], None)).unwrap();
        builder.add_stage("c", probe(&calls[2], None)).unwrap();
        builder.add_stage("d", probe(&calls[3], None)).unwrap();
        builder.add_dependency("a", "b").unwrap();
        builder.add_dependency("c", "d").unwrap();
        let graph = builder.validate().unwrap();

        let report = PipelineExecutor::new().run(&graph, &quiet()).await;

        assert_eq!(
            report.record("b").unwrap().outcome,
            StageOutcome::Skipped {
                upstream_failure: "a".into()
            }
        );
        assert_eq!(report.record("c").unwrap().outcome, StageOutcome::Succeeded);
        assert_eq!(report.record("d").unwrap().outcome, StageOutcome::Succeeded);
        assert_eq!(calls[1].load(Ordering::SeqCst), 0);
        assert_eq!(calls[3].load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_skip_prefers_earliest_declared_failure() {
        let calls = counters(3);
        let mut builder = TaskGraph::builder();
        builder
            .add_stage("a", probe(&calls[0], Some("first")))
            .unwrap();
        builder
            .add_stage("b", probe(&calls[1], Some("second")))
            .unwrap();
        builder.add_stage("c", probe(&calls[2], None)).unwrap();
        builder.add_dependency("a", "c").unwrap();
        builder.add_dependency("b", "c").unwrap();
        let graph = builder.validate().unwrap();

        let report = PipelineExecutor::new().run(&graph, &quiet()).await;

        assert_eq!(
            report.record("c").unwrap().outcome,
            StageOutcome::Skipped {
                upstream_failure: "a".into()
            }
        );
        assert_eq!(
            report.status,
            PipelineStatus::PartiallyFailed {
                first_failed: "a".into()
            }
        );
    }

    #[tokio::test]
    async fn test_one_record_per_declared_stage() {
        let calls = counters(5);
        let graph = chain(&STAGES, &calls, Some(("transform", "bad rows")));

        let report = PipelineExecutor::new().run(&graph, &quiet()).await;

        assert_eq!(report.records.len(), graph.len());
        for id in graph.stage_ids() {
            assert_eq!(report.records.iter().filter(|r| r.stage == id).count(), 1);
        }
    }

    #[tokio::test]
    async fn test_dry_run_invokes_nothing() {
        let calls = counters(5);
        let graph = chain(&STAGES, &calls, None);
        let options = ExecutionOptions {
            dry_run: true,
            quiet: true,
            ..Default::default()
        };

        let report = PipelineExecutor::new().run(&graph, &options).await;

        assert!(report.succeeded());
        assert!(report.records.is_empty());
        for count in &calls {
            assert_eq!(count.load(Ordering::SeqCst), 0);
        }
    }
}
