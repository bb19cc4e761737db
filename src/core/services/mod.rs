//! Business logic services
//!
//! Pure orchestration logic that operates on domain models.
//! These services have no I/O dependencies - they operate on
//! data passed in and return results.
//!
//! - [`graph`] - Validate and repair the dependency graph
//! - [`recommend`] - Score and rank the next task to work on
//! - [`annotate`] - Attach complexity scores, filter subtasks
//! - [`lifecycle`] - Add, update, and remove tasks

pub mod annotate;
pub mod graph;
pub mod lifecycle;
pub mod recommend;

pub use annotate::{FilteredTask, annotate_collection, annotate_task, filter_subtasks};
pub use graph::{
    BackEdge, FixOutcome, MissingReference, MissingSubtaskReference, RemovalReason, RemovedEdge,
    ValidationReport, find_cycles, fix, validate,
};
pub use lifecycle::{
    LifecycleError, NewSubtask, NewTask, add_dependency, add_subtask, add_task, next_subtask_id,
    next_task_id, remove_dependency, remove_subtask, remove_task, set_status,
};
pub use recommend::{
    BlockedTask, DEFAULT_MAX_ALTERNATIVES, FactorScores, NextTaskCriteria, NextTaskResult,
    ScoredTask, ScoringWeights, recommend_next_task,
};
