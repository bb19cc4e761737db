//! Change the status of a task or subtask

use taskgraph::core::models::parse_task_id;
use taskgraph::core::ports::TaskRepository;
use taskgraph::core::services::lifecycle;
use taskgraph::output::{OperationResult, OutputMode};

use super::Workspace;
use super::workspace::parse_status;

/// Set the status of `id`
pub fn set_status(
    workspace: &Workspace,
    id: &str,
    status: &str,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let id = parse_task_id(id)?;
    let status = parse_status(status)?;

    let previous = workspace.tasks.update(|tasks| {
        let previous = lifecycle::set_status(tasks, &id, status)?;
        Ok((previous, true))
    })?;

    OperationResult {
        success: true,
        message: format!("{id}: {previous} -> {status}"),
    }
    .render(mode);

    Ok(())
}
