//! Query-time annotation of tasks
//!
//! Complexity scores and subtask filters are applied to copies; the
//! canonical records are never touched.

use serde::Serialize;

use crate::core::models::{ComplexityReport, Task, TaskCollection, TaskStatus};

/// A task whose subtask list may have been filtered
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilteredTask {
    /// Copy of the task with only the matching subtasks
    pub task: Task,
    /// Number of subtasks before filtering
    pub original_subtask_count: usize,
}

impl FilteredTask {
    /// Whether any subtasks were dropped by the filter
    #[must_use]
    pub fn was_filtered(&self) -> bool {
        self.task.subtasks.len() != self.original_subtask_count
    }
}

/// Copy of `task` carrying its complexity score from `report`
///
/// A score already on the task is kept when the report has none.
#[must_use]
pub fn annotate_task(task: &Task, report: &ComplexityReport) -> Task {
    let mut annotated = task.clone();
    if let Some(score) = report.score_for(task.id) {
        annotated.complexity_score = Some(score);
    }
    annotated
}

/// Copy of `tasks` with complexity scores attached to every analysed task
#[must_use]
pub fn annotate_collection(tasks: &TaskCollection, report: &ComplexityReport) -> TaskCollection {
    let scores = report.scores();
    let mut annotated = tasks.clone();
    for task in annotated.tasks_mut() {
        if let Some(score) = scores.get(&task.id) {
            task.complexity_score = Some(*score);
        }
    }
    annotated
}

/// Copy of `task` keeping only subtasks with `status`
///
/// With no status every subtask is kept.
#[must_use]
pub fn filter_subtasks(task: &Task, status: Option<TaskStatus>) -> FilteredTask {
    let original_subtask_count = task.subtasks.len();
    let mut filtered = task.clone();
    if let Some(status) = status {
        filtered.subtasks.retain(|s| s.status == status);
    }
    FilteredTask {
        task: filtered,
        original_subtask_count,
    }
}
