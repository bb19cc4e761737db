//! Task model
//!
//! A task is a top-level unit of work. It may own an ordered list of
//! subtasks, whose ids are only unique within that list. Task-level
//! `dependencies` form the directed graph validated and repaired by
//! [`crate::core::services::graph`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::{TaskId, TaskRef};
use super::priority::Priority;
use super::status::TaskStatus;

/// A top-level work item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Positive id, unique within the collection
    pub id: TaskId,

    /// What needs to be done
    pub title: String,

    /// Longer explanation
    #[serde(default)]
    pub description: String,

    /// Implementation notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// How completion is verified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_strategy: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority level
    #[serde(default)]
    pub priority: Priority,

    /// Task ids that must be `done` before this one is actionable
    #[serde(default)]
    pub dependencies: Vec<TaskId>,

    /// Child work items
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<Subtask>,

    /// Optional deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// Complexity (1-10) merged in from a complexity report at query time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity_score: Option<f64>,
}

/// A child work item, scoped to one parent task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    /// Positive id, unique within the parent's subtask list
    pub id: u32,

    /// What needs to be done
    pub title: String,

    /// Longer explanation
    #[serde(default)]
    pub description: String,

    /// Implementation notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority; falls back to the parent's when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    /// Fully qualified references (`"5"` or `"5.2"`) this subtask waits on
    #[serde(default)]
    pub dependencies: Vec<TaskRef>,
}

impl Task {
    /// Create a pending, medium-priority task with no dependencies
    #[must_use]
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            details: None,
            test_strategy: None,
            status: TaskStatus::default(),
            priority: Priority::default(),
            dependencies: Vec::new(),
            subtasks: Vec::new(),
            due_date: None,
            complexity_score: None,
        }
    }

    /// This task's identifier as a reference
    #[must_use]
    pub const fn task_ref(&self) -> TaskRef {
        TaskRef::task(self.id)
    }

    /// Find a subtask by its local id
    #[must_use]
    pub fn subtask(&self, id: u32) -> Option<&Subtask> {
        self.subtasks.iter().find(|s| s.id == id)
    }

    /// Mutable access to a subtask by its local id
    pub fn subtask_mut(&mut self, id: u32) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|s| s.id == id)
    }

    /// Dependencies that resolve to a task that is not yet `done`
    ///
    /// Each id appears once, in first-listed order. Dependencies on ids
    /// missing from `all_tasks` cannot resolve, so they do not block; graph
    /// validation reports them instead.
    #[must_use]
    pub fn unmet_dependencies(&self, all_tasks: &[Self]) -> Vec<TaskId> {
        let mut unmet = Vec::new();
        for dep in &self.dependencies {
            let pending = all_tasks
                .iter()
                .find(|t| t.id == *dep)
                .is_some_and(|t| !t.status.is_complete());
            if pending && !unmet.contains(dep) {
                unmet.push(*dep);
            }
        }
        unmet
    }

    /// Number of subtasks in the `done` state
    #[must_use]
    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.status.is_complete()).count()
    }
}

impl Subtask {
    /// Create a pending subtask with no dependencies
    #[must_use]
    pub fn new(id: u32, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            details: None,
            status: TaskStatus::default(),
            priority: None,
            dependencies: Vec::new(),
        }
    }

    /// The priority used for this subtask, inheriting from `parent`
    #[must_use]
    pub fn effective_priority(&self, parent: &Task) -> Priority {
        self.priority.unwrap_or(parent.priority)
    }
}
