//! Output formatting for human and JSON modes
//!
//! This module provides structured output that can be rendered either as
//! human-readable text or machine-parseable JSON.

use std::fmt::Write as _;

use colored::Colorize;
use serde::Serialize;

use crate::core::models::{Priority, Task, TaskId, TaskRef, TaskStatus};
use crate::core::services::{FilteredTask, NextTaskResult, RemovedEdge, ValidationReport};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

fn print_json<T: Serialize>(value: &T) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

fn status_label(status: TaskStatus) -> String {
    let text = status.to_string();
    match status {
        TaskStatus::Done => text.green().to_string(),
        TaskStatus::InProgress => text.yellow().to_string(),
        TaskStatus::Cancelled | TaskStatus::Deferred => text.dimmed().to_string(),
        TaskStatus::Pending | TaskStatus::Review => text,
    }
}

fn join_ids<T: ToString>(ids: &[T]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Result of a validate operation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResult {
    /// Whether the graph is consistent
    pub valid: bool,
    /// Number of tasks checked
    pub task_count: usize,
    /// Everything that was found
    pub report: ValidationReport,
}

impl ValidateResult {
    /// Build from a report
    #[must_use]
    pub fn new(task_count: usize, report: ValidationReport) -> Self {
        Self {
            valid: report.is_valid(),
            task_count,
            report,
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        println!("Checked {} task(s).", self.task_count);
        if self.valid {
            println!("{}", "No dependency issues found.".green());
            return;
        }

        let report = &self.report;
        for missing in &report.missing_references {
            println!(
                "  {} task {} depends on missing task {}",
                "missing".red(),
                missing.task_id,
                missing.dependency_id
            );
        }
        for id in &report.self_references {
            println!("  {} task {id} depends on itself", "self".red());
        }
        for cycle in &report.cycles {
            let path = cycle.iter().map(ToString::to_string).collect::<Vec<_>>().join(" -> ");
            println!("  {} {path}", "cycle".red());
        }
        for missing in &report.missing_subtask_references {
            println!(
                "  {} subtask {} depends on missing {}",
                "missing".red(),
                missing.subtask,
                missing.dependency
            );
        }
        for id in &report.subtask_self_references {
            println!("  {} subtask {id} depends on itself", "self".red());
        }
        println!("\n{} issue(s) found.", report.issue_count().to_string().red().bold());
        println!("To repair: taskgraph fix");
    }
}

/// Result of a fix operation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixResult {
    /// Whether the repaired collection was written back
    pub saved: bool,
    /// Every dependency that was (or would be) removed
    pub removed_edges: Vec<RemovedEdge>,
}

impl FixResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.removed_edges.is_empty() {
            println!("{}", "Nothing to fix.".green());
            return;
        }
        let verb = if self.saved { "Removed" } else { "Would remove" };
        println!("{verb} {} dependency edge(s):", self.removed_edges.len());
        for edge in &self.removed_edges {
            println!("  {} -> {} ({})", edge.from, edge.to, edge.reason.to_string().yellow());
        }
        if !self.saved {
            println!("\nDry run; nothing was written.");
        }
    }
}

/// Result of a next operation
#[derive(Debug, Serialize)]
pub struct NextResult {
    /// The ranked recommendation
    #[serde(flatten)]
    pub result: NextTaskResult,
}

impl NextResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let result = &self.result;
        match &result.recommendation {
            Some(top) => {
                println!(
                    "Next: {} {} ({:.2})",
                    format!("[{}]", top.task_id).bold(),
                    top.title,
                    top.score
                );
                for reason in &top.reasons {
                    println!("  - {reason}");
                }
            },
            None => println!("No task is ready to start."),
        }

        if !result.alternatives.is_empty() {
            println!("\nAlternatives:");
            for alt in &result.alternatives {
                println!("  [{}] {} ({:.2})", alt.task_id, alt.title, alt.score);
            }
        }

        if !result.blocked_tasks.is_empty() {
            println!("\nBlocked:");
            for blocked in &result.blocked_tasks {
                println!("  [{}] {} - {}", blocked.task_id, blocked.title, blocked.reason.dimmed());
            }
        }
    }
}

/// One row of a task listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    /// Task id
    pub id: TaskId,
    /// Task title
    pub title: String,
    /// Current status
    pub status: TaskStatus,
    /// Priority
    pub priority: Priority,
    /// Dependency ids
    pub dependencies: Vec<TaskId>,
    /// Completed subtasks
    pub subtasks_done: usize,
    /// Total subtasks
    pub subtasks_total: usize,
    /// Attached complexity score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity_score: Option<f64>,
}

impl From<&Task> for TaskSummary {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            status: task.status,
            priority: task.priority,
            dependencies: task.dependencies.clone(),
            subtasks_done: task.completed_subtasks(),
            subtasks_total: task.subtasks.len(),
            complexity_score: task.complexity_score,
        }
    }
}

/// Result of a list operation
#[derive(Debug, Serialize)]
pub struct TaskListResult {
    /// Listed tasks
    pub tasks: Vec<TaskSummary>,
}

impl TaskListResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        if self.tasks.is_empty() {
            println!("No tasks found.");
            return;
        }

        for task in &self.tasks {
            let mut line = format!(
                "  [{}] {} ({}, {})",
                task.id,
                task.title,
                status_label(task.status),
                task.priority
            );
            if task.subtasks_total > 0 {
                let _ = write!(line, " {}/{} subtasks", task.subtasks_done, task.subtasks_total);
            }
            if !task.dependencies.is_empty() {
                let _ = write!(line, " deps: {}", join_ids(&task.dependencies));
            }
            if let Some(score) = task.complexity_score {
                let _ = write!(line, " complexity: {score}");
            }
            println!("{line}");
        }
    }
}

/// Result of a show operation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskShowResult {
    /// The task, subtasks possibly filtered
    #[serde(flatten)]
    pub task: FilteredTask,
    /// Dependencies that are not yet done
    pub unmet_dependencies: Vec<TaskId>,
}

impl TaskShowResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => print_json(self),
        }
    }

    fn render_human(&self) {
        let task = &self.task.task;
        println!("{} {}", format!("[{}]", task.id).bold(), task.title.bold());
        println!("  Status:   {}", status_label(task.status));
        println!("  Priority: {}", task.priority);
        if let Some(due) = task.due_date {
            println!("  Due:      {due}");
        }
        if let Some(score) = task.complexity_score {
            println!("  Complexity: {score}");
        }
        if !task.dependencies.is_empty() {
            println!("  Depends on: {}", join_ids(&task.dependencies));
        }
        if !self.unmet_dependencies.is_empty() {
            println!("  {} {}", "Blocked by:".red(), join_ids(&self.unmet_dependencies));
        }
        if !task.description.is_empty() {
            println!("\n  {}", task.description);
        }
        if let Some(details) = &task.details {
            println!("\n  {details}");
        }

        if self.task.original_subtask_count > 0 {
            println!(
                "\nSubtasks ({}/{} shown):",
                task.subtasks.len(),
                self.task.original_subtask_count
            );
            for subtask in &task.subtasks {
                let id = TaskRef::subtask(task.id, subtask.id);
                let mut line =
                    format!("  [{id}] {} ({})", subtask.title, status_label(subtask.status));
                if !subtask.dependencies.is_empty() {
                    let _ = write!(line, " deps: {}", join_ids(&subtask.dependencies));
                }
                println!("{line}");
            }
        }
    }
}

/// Result of a parse-id operation
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseIdResult {
    /// Parent task id
    pub task_id: TaskId,
    /// Subtask id, if the input named a subtask
    pub subtask_id: Option<u32>,
    /// Canonical string form
    pub formatted: String,
}

impl From<TaskRef> for ParseIdResult {
    fn from(id: TaskRef) -> Self {
        Self {
            task_id: id.task_id,
            subtask_id: id.subtask_id,
            formatted: id.to_string(),
        }
    }
}

impl ParseIdResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => {
                println!("task:    {}", self.task_id);
                if let Some(sub) = self.subtask_id {
                    println!("subtask: {sub}");
                }
                println!("id:      {}", self.formatted);
            },
            OutputMode::Json => print_json(self),
        }
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => print_json(self),
        }
    }
}
