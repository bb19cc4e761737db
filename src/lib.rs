//! taskgraph - dependency validation, repair, and next-task recommendation
//! for hierarchical task lists
//!
//! Tasks carry ids, statuses, priorities, and dependency lists; subtasks are
//! addressed with composite `"parent.sub"` ids. This library checks the
//! dependency graph for dangling references, self-references, and cycles,
//! repairs it by dropping offending edges, and ranks the tasks that are
//! ready to start.

// Deny all clippy warnings in this crate
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_import_braces,
    unused_qualifications
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cargo_common_metadata
)]

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod adapters;
pub mod config;
pub mod core;
pub mod output;
pub mod paths;

pub use crate::core::models::{
    Priority, Subtask, Task, TaskCollection, TaskId, TaskRef, TaskStatus, format_task_id,
    ids_equal, parse_task_id,
};
pub use crate::core::services::{
    FixOutcome, NextTaskCriteria, NextTaskResult, ValidationReport, recommend_next_task,
};

use crate::core::services::{fix, validate};

/// Check the dependency graph without modifying it
///
/// See [`validate`].
#[must_use]
pub fn validate_dependencies(tasks: &TaskCollection) -> ValidationReport {
    validate(tasks)
}

/// Repair the dependency graph, returning a new collection
///
/// See [`fix`].
#[must_use]
pub fn fix_dependencies(tasks: &TaskCollection) -> FixOutcome {
    fix(tasks)
}
