//! Complexity report
//!
//! An externally produced analysis scoring each task's complexity from 1
//! to 10. The core only reads it; scores are attached to copies of tasks.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::id::TaskId;

/// Complexity analysis for a set of tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityReport {
    /// One entry per analysed task
    #[serde(default)]
    pub complexity_analysis: Vec<ComplexityEntry>,
}

/// Complexity analysis of a single task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityEntry {
    /// The analysed task
    pub task_id: TaskId,

    /// Title at the time of analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,

    /// Score from 1 (trivial) to 10 (very complex)
    pub complexity_score: f64,

    /// Suggested number of subtasks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_subtasks: Option<u32>,

    /// Why the score was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl ComplexityReport {
    /// Build a report from `(task, score)` pairs
    #[must_use]
    pub fn from_scores(scores: impl IntoIterator<Item = (TaskId, f64)>) -> Self {
        Self {
            complexity_analysis: scores
                .into_iter()
                .map(|(task_id, complexity_score)| ComplexityEntry {
                    task_id,
                    task_title: None,
                    complexity_score,
                    recommended_subtasks: None,
                    reasoning: None,
                })
                .collect(),
        }
    }

    /// Score for a task, if analysed
    ///
    /// When a task appears more than once the last entry wins.
    #[must_use]
    pub fn score_for(&self, task_id: TaskId) -> Option<f64> {
        self.complexity_analysis
            .iter()
            .rev()
            .find(|e| e.task_id == task_id)
            .map(|e| e.complexity_score)
    }

    /// All scores keyed by task id
    #[must_use]
    pub fn scores(&self) -> HashMap<TaskId, f64> {
        self.complexity_analysis
            .iter()
            .map(|e| (e.task_id, e.complexity_score))
            .collect()
    }
}
