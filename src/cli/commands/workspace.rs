//! Resolve configuration and stores for a command

use std::path::PathBuf;

use anyhow::Context;
use taskgraph::adapters::{JsonComplexityReportProvider, JsonTaskRepository};
use taskgraph::config::Config;
use taskgraph::core::models::{TaskCollection, TaskId, TaskRef, TaskStatus, parse_task_id};
use taskgraph::core::ports::{ComplexityReportProvider, TaskRepository};
use taskgraph::core::services::annotate_collection;

/// Config plus the stores it points at
#[derive(Debug)]
pub struct Workspace {
    /// Effective configuration
    pub config: Config,
    /// The task store
    pub tasks: JsonTaskRepository,
    /// The complexity report, if one exists
    pub reports: JsonComplexityReportProvider,
}

impl Workspace {
    /// Discover config from the current directory; `file` overrides the task store
    pub fn open(file: Option<PathBuf>) -> anyhow::Result<Self> {
        let root = std::env::current_dir().context("cannot determine current directory")?;
        let config = Config::discover(&root)?;
        let tasks_file = file.unwrap_or_else(|| config.tasks_file(&root));
        let report_file = config.complexity_report(&root);
        log::debug!("tasks file: {}", tasks_file.display());

        Ok(Self {
            tasks: JsonTaskRepository::new(tasks_file),
            reports: JsonComplexityReportProvider::new(report_file),
            config,
        })
    }

    /// Load tasks with complexity scores attached for display and ranking
    ///
    /// Never save the result; scores are not part of the task store.
    pub fn load_annotated(&self) -> anyhow::Result<TaskCollection> {
        let tasks = self.tasks.load()?;
        Ok(match self.reports.report()? {
            Some(report) => annotate_collection(&tasks, &report),
            None => tasks,
        })
    }
}

/// Parse a status argument
pub fn parse_status(raw: &str) -> anyhow::Result<TaskStatus> {
    raw.parse().map_err(anyhow::Error::msg)
}

/// Parse an id argument that must name a top-level task
pub fn parse_top_level(raw: &str) -> anyhow::Result<TaskId> {
    let id: TaskRef = parse_task_id(raw)?;
    if id.is_subtask() {
        anyhow::bail!("{id} is a subtask; expected a task id");
    }
    Ok(id.task_id)
}
