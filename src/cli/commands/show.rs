//! Show a single task

use taskgraph::core::models::parse_task_id;
use taskgraph::core::services::filter_subtasks;
use taskgraph::output::{OutputMode, TaskShowResult};

use super::Workspace;
use super::workspace::parse_status;

/// Show a task, or a subtask in the context of its parent
pub fn show(
    workspace: &Workspace,
    id: &str,
    status: Option<&str>,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let id = parse_task_id(id)?;
    let status = status.map(parse_status).transpose()?;
    let tasks = workspace.load_annotated()?;

    let Some(task) = tasks.get(id.task_id) else {
        anyhow::bail!("task {} not found", id.task_id);
    };

    let mut filtered = filter_subtasks(task, status);
    if let Some(sub) = id.subtask_id {
        if task.subtask(sub).is_none() {
            anyhow::bail!("subtask {id} not found");
        }
        filtered.task.subtasks.retain(|s| s.id == sub);
    }

    TaskShowResult {
        unmet_dependencies: task.unmet_dependencies(tasks.tasks()),
        task: filtered,
    }
    .render(mode);

    Ok(())
}
