//! Centralized path definitions for taskgraph
//!
//! This module provides a single source of truth for all filesystem paths
//! used by taskgraph.
//!
//! ## Storage Layout
//!
//! ### Per-Project
//!
//! ```text
//! project/
//! ├── .taskgraph.toml                       # Project configuration
//! └── .taskgraph/
//!     ├── tasks.json                        # The task collection
//!     └── task-complexity-report.json       # Optional complexity analysis
//! ```
//!
//! ### Global (User-Level)
//!
//! ```text
//! ~/.taskgraph/
//! └── config.toml               # Defaults used when a project has no config
//! ```

use std::path::{Path, PathBuf};

// =============================================================================
// Project-level paths
// =============================================================================

/// Directory name for project state
pub const TASKGRAPH_DIR: &str = ".taskgraph";

/// Project configuration filename
pub const TASKGRAPH_TOML: &str = ".taskgraph.toml";

/// Task store filename
const TASKS_FILE: &str = "tasks.json";

/// Complexity report filename
const COMPLEXITY_REPORT_FILE: &str = "task-complexity-report.json";

/// Get path to `.taskgraph.toml` under `root`.
#[must_use]
pub fn project_config(root: &Path) -> PathBuf {
    root.join(TASKGRAPH_TOML)
}

/// Default task store location, relative to the project root.
#[must_use]
pub fn default_tasks_file() -> PathBuf {
    Path::new(TASKGRAPH_DIR).join(TASKS_FILE)
}

/// Default complexity report location, relative to the project root.
#[must_use]
pub fn default_complexity_report() -> PathBuf {
    Path::new(TASKGRAPH_DIR).join(COMPLEXITY_REPORT_FILE)
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global config directory name
const GLOBAL_DIR: &str = ".taskgraph";

/// Global config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Get the global taskgraph directory.
///
/// Returns `~/.taskgraph/`.
#[must_use]
pub fn global_config_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global config file path.
///
/// Returns `~/.taskgraph/config.toml`.
#[must_use]
pub fn global_config() -> PathBuf {
    global_config_dir().join(GLOBAL_CONFIG_FILE)
}
