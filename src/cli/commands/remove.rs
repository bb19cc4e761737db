//! Remove a task or subtask

use taskgraph::core::models::parse_task_id;
use taskgraph::core::ports::TaskRepository;
use taskgraph::core::services::lifecycle;
use taskgraph::output::{OperationResult, OutputMode};

use super::Workspace;

/// Remove `id` and every dependency entry pointing at it
pub fn remove(workspace: &Workspace, id: &str, mode: OutputMode) -> anyhow::Result<()> {
    let id = parse_task_id(id)?;

    let title = workspace.tasks.update(|tasks| {
        let title = if id.is_subtask() {
            lifecycle::remove_subtask(tasks, &id)?.title
        } else {
            lifecycle::remove_task(tasks, id.task_id)?.title
        };
        Ok((title, true))
    })?;

    OperationResult {
        success: true,
        message: format!("Removed {id}: {title}"),
    }
    .render(mode);

    Ok(())
}
