//! List tasks

use taskgraph::output::{OutputMode, TaskListResult, TaskSummary};

use super::Workspace;
use super::workspace::parse_status;

/// List tasks, optionally only those with `status`
pub fn list(workspace: &Workspace, status: Option<&str>, mode: OutputMode) -> anyhow::Result<()> {
    let status = status.map(parse_status).transpose()?;
    let tasks = workspace.load_annotated()?;

    let tasks = tasks
        .iter()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .map(TaskSummary::from)
        .collect();

    TaskListResult { tasks }.render(mode);
    Ok(())
}
