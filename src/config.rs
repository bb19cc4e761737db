//! Configuration management
//!
//! Settings come from `.taskgraph.toml` in the project root, falling back
//! to `~/.taskgraph/config.toml`, falling back to built-in defaults.
//! A missing file is not an error; an unparsable one is.
//!
//! ```toml
//! [store]
//! tasks_file = ".taskgraph/tasks.json"
//! complexity_report = ".taskgraph/task-complexity-report.json"
//!
//! [scoring]
//! priority = 0.7
//! dependency = 0.3
//! complexity = 0.0
//! due_date = 0.0
//!
//! [next]
//! include_in_progress = false
//! max_alternatives = 5
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::services::{DEFAULT_MAX_ALTERNATIVES, NextTaskCriteria, ScoringWeights};
use crate::paths;

/// taskgraph configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where tasks and reports live
    #[serde(default)]
    pub store: StoreConfig,
    /// Recommendation weights
    #[serde(default)]
    pub scoring: ScoringWeights,
    /// Recommendation defaults
    #[serde(default)]
    pub next: NextConfig,
}

/// File locations, relative to the project root unless absolute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// The task collection
    #[serde(default = "paths::default_tasks_file")]
    pub tasks_file: PathBuf,
    /// The complexity analysis report
    #[serde(default = "paths::default_complexity_report")]
    pub complexity_report: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            tasks_file: paths::default_tasks_file(),
            complexity_report: paths::default_complexity_report(),
        }
    }
}

/// Defaults for next-task recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextConfig {
    /// Also consider in-progress tasks
    #[serde(default)]
    pub include_in_progress: bool,
    /// How many alternatives to list
    #[serde(default = "default_max_alternatives")]
    pub max_alternatives: usize,
}

const fn default_max_alternatives() -> usize {
    DEFAULT_MAX_ALTERNATIVES
}

impl Default for NextConfig {
    fn default() -> Self {
        Self {
            include_in_progress: false,
            max_alternatives: default_max_alternatives(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load a config file, or defaults if it does not exist
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("invalid config in {}", path.display()))
    }

    /// Load the project config under `root`, else the global one, else defaults
    pub fn discover(root: &Path) -> anyhow::Result<Self> {
        let project = paths::project_config(root);
        if project.exists() {
            log::debug!("using config {}", project.display());
            return Self::load_file(&project);
        }
        let global = paths::global_config();
        if global.exists() {
            log::debug!("using config {}", global.display());
            return Self::load_file(&global);
        }
        Ok(Self::default())
    }

    /// Task store path resolved against `root`
    #[must_use]
    pub fn tasks_file(&self, root: &Path) -> PathBuf {
        root.join(&self.store.tasks_file)
    }

    /// Complexity report path resolved against `root`
    #[must_use]
    pub fn complexity_report(&self, root: &Path) -> PathBuf {
        root.join(&self.store.complexity_report)
    }

    /// Recommendation criteria from the configured defaults
    #[must_use]
    pub fn criteria(&self) -> NextTaskCriteria {
        NextTaskCriteria {
            include_in_progress: self.next.include_in_progress,
            exclude: Vec::new(),
            weights: self.scoring,
            max_alternatives: self.next.max_alternatives,
        }
    }
}
