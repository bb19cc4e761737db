//! Report dependency problems

use taskgraph::core::ports::TaskRepository;
use taskgraph::output::{OutputMode, ValidateResult};

use super::Workspace;

/// Validate the dependency graph, exiting non-zero when it is not clean
pub fn validate(workspace: &Workspace, mode: OutputMode) -> anyhow::Result<()> {
    let tasks = workspace.tasks.load()?;
    let report = taskgraph::validate_dependencies(&tasks);
    let result = ValidateResult::new(tasks.len(), report);

    result.render(mode);

    if !result.valid {
        std::process::exit(1);
    }

    Ok(())
}
