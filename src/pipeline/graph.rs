// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Task graph construction and ordering
//!
//! Builds a validated, acyclic description of stages and the
//! must-complete-before edges between them, and exposes a deterministic
//! topological ordering for the executor.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::errors::{LakeflowError, LakeflowResult};
use crate::pipeline::stage::{Stage, StageAction};

/// Builder for task graphs
///
/// Stages are registered first, then dependency edges between them.
/// `validate` consumes the builder and is the only way to obtain a
/// [`TaskGraph`], so an unvalidated or cyclic graph can never reach the
/// executor.
pub struct TaskGraphBuilder {
    stages: Vec<Stage>,
    graph: DiGraph<usize, ()>,
    name_to_index: HashMap<String, NodeIndex>,
}

/// DFS visitation state used by cycle detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    OnPath,
    Done,
}

impl TaskGraphBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            graph: DiGraph::new(),
            name_to_index: HashMap::new(),
        }
    }

    /// Register a stage under a unique id
    pub fn add_stage(
        &mut self,
        id: impl Into<String>,
        action: Box<dyn StageAction>,
    ) -> LakeflowResult<()> {
        let id = id.into();
        if self.name_to_index.contains_key(&id) {
            return Err(LakeflowError::DuplicateStage { stage: id });
        }

        let node = self.graph.add_node(self.stages.len());
        self.name_to_index.insert(id.clone(), node);
        self.stages.push(Stage::new(id, action));
        Ok(())
    }

    /// Declare that `from` must complete successfully before `to` may start
    ///
    /// Both ids must already be registered. Redeclaring an existing edge is
    /// a no-op.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> LakeflowResult<()> {
        let from_node = self.lookup(from)?;
        let to_node = self.lookup(to)?;

        if !self.graph.contains_edge(from_node, to_node) {
            self.graph.add_edge(from_node, to_node, ());
        }
        Ok(())
    }

    /// Check acyclicity and seal the graph
    pub fn validate(self) -> LakeflowResult<TaskGraph> {
        if let Some(cycle) = self.find_cycle() {
            let path = cycle
                .into_iter()
                .map(|idx| self.stages[idx].id.clone())
                .collect();
            return Err(LakeflowError::CycleDetected { path });
        }

        Ok(TaskGraph {
            stages: self.stages,
            graph: self.graph,
            name_to_index: self.name_to_index,
        })
    }

    fn lookup(&self, id: &str) -> LakeflowResult<NodeIndex> {
        self.name_to_index
            .get(id)
            .copied()
            .ok_or_else(|| LakeflowError::UnknownStage {
                stage: id.to_string(),
            })
    }

    /// Depth-first search for a back-edge, tracking the current path so the
    /// reported cycle closes on the repeated stage.
    fn find_cycle(&self) -> Option<Vec<usize>> {
        let mut marks = vec![Mark::Unvisited; self.stages.len()];
        let mut path = Vec::new();

        for start in 0..self.stages.len() {
            if marks[start] == Mark::Unvisited {
                if let Some(cycle) = Self::cycle_from(&self.graph, start, &mut marks, &mut path) {
                    return Some(cycle);
                }
            }
        }

        None
    }

    fn cycle_from(
        graph: &DiGraph<usize, ()>,
        node: usize,
        marks: &mut [Mark],
        path: &mut Vec<usize>,
    ) -> Option<Vec<usize>> {
        marks[node] = Mark::OnPath;
        path.push(node);

        // Sorted for deterministic cycle reporting.
        let mut successors: Vec<usize> = graph
            .neighbors(NodeIndex::new(node))
            .map(|n| n.index())
            .collect();
        successors.sort_unstable();

        for next in successors {
            match marks[next] {
                Mark::OnPath => {
                    let at = path.iter().position(|&p| p == next).unwrap_or(0);
                    let mut cycle: Vec<usize> = path[at..].to_vec();
                    cycle.push(next);
                    return Some(cycle);
                }
                Mark::Unvisited => {
                    if let Some(cycle) = Self::cycle_from(graph, next, marks, path) {
                        return Some(cycle);
                    }
                }
                Mark::Done => {}
            }
        }

        path.pop();
        marks[node] = Mark::Done;
        None
    }
}

impl Default for TaskGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A validated, acyclic set of stages and ordering edges
///
/// Immutable once built; the executor only borrows it. Nodes carry their
/// declaration index as weight, and since nodes are never removed,
/// `NodeIndex::new(i)` and declaration index `i` coincide.
pub struct TaskGraph {
    stages: Vec<Stage>,
    graph: DiGraph<usize, ()>,
    name_to_index: HashMap<String, NodeIndex>,
}

impl TaskGraph {
    /// Start building a new task graph
    pub fn builder() -> TaskGraphBuilder {
        TaskGraphBuilder::new()
    }

    /// Number of declared stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the graph has no stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage ids in declaration order
    pub fn stage_ids(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.id.as_str()).collect()
    }

    /// Whether a stage id is declared
    pub fn contains(&self, id: &str) -> bool {
        self.name_to_index.contains_key(id)
    }

    pub(crate) fn stage(&self, idx: usize) -> &Stage {
        &self.stages[idx]
    }

    /// Stage ids in execution order
    ///
    /// For every edge (u, v), u appears strictly before v. Stages with no
    /// ordering relation between them appear in declaration order, so the
    /// sequence is identical run-to-run.
    pub fn topological_order(&self) -> Vec<&str> {
        self.topo_indices()
            .into_iter()
            .map(|idx| self.stages[idx].id.as_str())
            .collect()
    }

    /// Kahn's algorithm with a min-heap on declaration index: among ready
    /// stages, the earliest-declared runs first.
    pub(crate) fn topo_indices(&self) -> Vec<usize> {
        let mut indegree = vec![0usize; self.stages.len()];
        for edge in self.graph.edge_references() {
            indegree[edge.target().index()] += 1;
        }

        let mut ready: BinaryHeap<Reverse<usize>> = indegree
            .iter()
            .enumerate()
            .filter(|(_, &degree)| degree == 0)
            .map(|(idx, _)| Reverse(idx))
            .collect();

        let mut order = Vec::with_capacity(self.stages.len());
        while let Some(Reverse(idx)) = ready.pop() {
            order.push(idx);
            for next in self.graph.neighbors(NodeIndex::new(idx)) {
                let target = next.index();
                indegree[target] -= 1;
                if indegree[target] == 0 {
                    ready.push(Reverse(target));
                }
            }
        }

        // Acyclicity was checked at validate(), so every stage is emitted.
        debug_assert_eq!(order.len(), self.stages.len());
        order
    }

    /// Direct predecessors of a stage, sorted by declaration order
    pub(crate) fn predecessors(&self, idx: usize) -> Vec<usize> {
        let mut preds: Vec<usize> = self
            .graph
            .neighbors_directed(NodeIndex::new(idx), Direction::Incoming)
            .map(|n| n.index())
            .collect();
        preds.sort_unstable();
        preds
    }

    /// Direct dependencies of a stage by id (stages that must run before it)
    pub fn dependencies_of(&self, id: &str) -> Option<Vec<&str>> {
        let node = self.name_to_index.get(id)?;
        Some(
            self.predecessors(node.index())
                .into_iter()
                .map(|idx| self.stages[idx].id.as_str())
                .collect(),
        )
    }

    /// Generate text representation of execution order
    pub fn to_text(&self) -> String {
        let mut out = String::new();

        for (i, idx) in self.topo_indices().iter().enumerate() {
            let stage = &self.stages[*idx];
            let deps = self.dependencies_of(&stage.id).unwrap_or_default();

            out.push_str(&format!("{}. {}", i + 1, stage.id));
            if !deps.is_empty() {
                out.push_str(&format!(" [depends: {}]", deps.join(", ")));
            }
            out.push('\n');
        }

        out
    }

    /// Generate DOT diagram of the task graph
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph pipeline {\n");
        out.push_str("    rankdir=TB;\n");
        out.push_str("    node [shape=box, style=rounded];\n\n");

        for edge in self.graph.edge_references() {
            let from = &self.stages[edge.source().index()].id;
            let to = &self.stages[edge.target().index()].id;
            out.push_str(&format!("    \"{}\" -> \"{}\";\n", from, to));
        }

        // Isolated stages (no edges)
        for (idx, stage) in self.stages.iter().enumerate() {
            if self
                .graph
                .neighbors_undirected(NodeIndex::new(idx))
                .count()
                == 0
            {
                out.push_str(&format!("    \"{}\";\n", stage.id));
            }
        }

        out.push_str("}\n");
        out
    }

    /// Generate Mermaid diagram of the task graph
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("graph TD\n");

        for stage in &self.stages {
            out.push_str(&format!("    {}[{}]\n", stage.id, stage.id));
        }

        for edge in self.graph.edge_references() {
            let from = &self.stages[edge.source().index()].id;
            let to = &self.stages[edge.target().index()].id;
            out.push_str(&format!("    {} --> {}\n", from, to));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct NoopAction;

    #[async_trait]
    impl StageAction for NoopAction {
        async fn execute(&self) -> anyhow::Result<()> {
            Ok(())
        }
    }

    fn make_graph(stages: Vec<(&str, Vec<&str>)>) -> LakeflowResult<TaskGraph> {
        let mut builder = TaskGraph::builder();
        for (name, _) in &stages {
            builder.add_stage(*name, Box::new(NoopAction))?;
        }
        for (name, deps) in &stages {
            for dep in deps {
                builder.add_dependency(dep, name)?;
            }
        }
        builder.validate()
    }

    #[test]
    fn test_linear_order() {
        let graph = make_graph(vec![("a", vec![]), ("b", vec!["a"]), ("c", vec!["b"])]).unwrap();

        assert_eq!(graph.topological_order(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_diamond_declaration_order() {
        let graph = make_graph(vec![
            ("a", vec![]),
            ("b", vec!["a"]),
            ("c", vec!["a"]),
            ("d", vec!["b", "c"]),
        ])
        .unwrap();

        // b and c are unordered relative to each other; declaration order wins.
        assert_eq!(graph.topological_order(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_independent_stages_keep_declaration_order() {
        let graph = make_graph(vec![("c", vec![]), ("a", vec![]), ("b", vec![])]).unwrap();

        assert_eq!(graph.topological_order(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_order_is_deterministic() {
        let graph = make_graph(vec![
            ("a", vec![]),
            ("b", vec![]),
            ("c", vec!["a"]),
            ("d", vec!["b", "c"]),
        ])
        .unwrap();

        assert_eq!(graph.topological_order(), graph.topological_order());
    }

    #[test]
    fn test_edges_respected() {
        let edges = vec![("a", "c"), ("b", "c"), ("c", "e"), ("d", "e")];
        let graph = make_graph(vec![
            ("e", vec!["c", "d"]),
            ("d", vec![]),
            ("c", vec!["a", "b"]),
            ("b", vec![]),
            ("a", vec![]),
        ])
        .unwrap();

        let order = graph.topological_order();
        let position = |id: &str| order.iter().position(|s| *s == id).unwrap();
        for (from, to) in edges {
            assert!(position(from) < position(to), "{} must precede {}", from, to);
        }
    }

    #[test]
    fn test_duplicate_stage() {
        let mut builder = TaskGraph::builder();
        builder.add_stage("a", Box::new(NoopAction)).unwrap();
        let result = builder.add_stage("a", Box::new(NoopAction));

        assert!(matches!(
            result,
            Err(LakeflowError::DuplicateStage { stage }) if stage == "a"
        ));
    }

    #[test]
    fn test_unknown_dependency() {
        let mut builder = TaskGraph::builder();
        builder.add_stage("a", Box::new(NoopAction)).unwrap();
        let result = builder.add_dependency("a", "nonexistent");

        assert!(matches!(
            result,
            Err(LakeflowError::UnknownStage { stage }) if stage == "nonexistent"
        ));
    }

    #[test]
    fn test_cycle_detection() {
        let result = make_graph(vec![("a", vec!["b"]), ("b", vec!["a"])]);

        match result {
            Err(LakeflowError::CycleDetected { path }) => {
                assert_eq!(path.first(), path.last());
                assert!(path.len() >= 3);
            }
            other => panic!("expected cycle error, got {:?}", other.map(|g| g.len())),
        }
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let mut builder = TaskGraph::builder();
        builder.add_stage("a", Box::new(NoopAction)).unwrap();
        builder.add_dependency("a", "a").unwrap();

        match builder.validate() {
            Err(LakeflowError::CycleDetected { path }) => {
                assert_eq!(path, vec!["a", "a"]);
            }
            other => panic!("expected cycle error, got {:?}", other.map(|g| g.len())),
        }
    }

    #[test]
    fn test_duplicate_edge_is_idempotent() {
        let mut builder = TaskGraph::builder();
        builder.add_stage("a", Box::new(NoopAction)).unwrap();
        builder.add_stage("b", Box::new(NoopAction)).unwrap();
        builder.add_dependency("a", "b").unwrap();
        builder.add_dependency("a", "b").unwrap();

        let graph = builder.validate().unwrap();
        assert_eq!(graph.dependencies_of("b").unwrap(), vec!["a"]);
    }

    #[test]
    fn test_dependencies_in_declaration_order() {
        let graph = make_graph(vec![
            ("b", vec![]),
            ("a", vec![]),
            ("c", vec!["a", "b"]),
        ])
        .unwrap();

        // b declared before a, so it comes first regardless of edge order.
        assert_eq!(graph.dependencies_of("c").unwrap(), vec!["b", "a"]);
    }

    #[test]
    fn test_dot_output() {
        let graph = make_graph(vec![("a", vec![]), ("b", vec!["a"]), ("x", vec![])]).unwrap();
        let dot = graph.to_dot();

        assert!(dot.contains("\"a\" -> \"b\";"));
        assert!(dot.contains("\"x\";"));
    }

    #[test]
    fn test_mermaid_output() {
        let graph = make_graph(vec![("a", vec![]), ("b", vec!["a"])]).unwrap();
        let mermaid = graph.to_mermaid();

        assert!(mermaid.contains("graph TD"));
        assert!(mermaid.contains("a --> b"));
    }
}
