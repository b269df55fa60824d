// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 lakeflow contributors

//! Error recovery suggestions
//!
//! Provides actionable suggestions for recovering from configuration and
//! graph construction problems.

/// A recovery suggestion with concrete steps
#[derive(Debug, Clone)]
pub struct RecoverySuggestion {
    /// Brief description of what to do
    pub action: String,
    /// Detailed steps
    pub steps: Vec<String>,
    /// Commands to run
    pub commands: Vec<String>,
}

impl RecoverySuggestion {
    /// Suggest fixing a dependency cycle
    pub fn fix_cycle(path: &[String]) -> Self {
        Self {
            action: "Remove dependency cycle".into(),
            steps: vec![
                format!("Detected cycle: {}", path.join(" -> ")),
                "Review your stage dependencies".into(),
                "Ensure stages form a directed acyclic graph".into(),
            ],
            commands: vec![
                "# Visualize your pipeline:".into(),
                "lakeflow graph --format mermaid".into(),
            ],
        }
    }

    /// Suggest creating a missing storage tier directory
    pub fn create_tier_dir(tier: &str, dir: &str) -> Self {
        Self {
            action: format!("Create the {tier} tier directory"),
            steps: vec![
                format!("The {tier} tier points at '{dir}', which does not exist"),
                "The ingest stage creates the raw tier on demand; other tiers \
                 are created by the stages that write to them"
                    .into(),
                "Create it up front if you want to verify permissions early".into(),
            ],
            commands: vec![format!("mkdir -p {dir}")],
        }
    }

    /// Suggest recreating a missing configuration file
    pub fn create_config(path: &str) -> Self {
        Self {
            action: "Create a configuration file".into(),
            steps: vec![
                format!("No configuration found at '{path}'"),
                "lakeflow needs the storage tier locations before it can run".into(),
            ],
            commands: vec!["lakeflow init".into()],
        }
    }

    /// Render the suggestion as indented console text
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("  {}\n", self.action));
        for step in &self.steps {
            out.push_str(&format!("    - {}\n", step));
        }
        for cmd in &self.commands {
            out.push_str(&format!("    $ {}\n", cmd));
        }
        out
    }
}
