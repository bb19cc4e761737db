//! Repair the dependency graph

use taskgraph::core::ports::TaskRepository;
use taskgraph::output::{FixResult, OutputMode};

use super::Workspace;

/// Remove invalid dependencies and write the repaired collection back
pub fn fix(workspace: &Workspace, dry_run: bool, mode: OutputMode) -> anyhow::Result<()> {
    let tasks = workspace.tasks.load()?;
    let outcome = taskgraph::fix_dependencies(&tasks);

    let saved = !dry_run && !outcome.is_noop();
    if saved {
        workspace.tasks.save(&outcome.tasks)?;
        log::info!(
            "wrote {} after removing {} edge(s)",
            workspace.tasks.path().display(),
            outcome.removed_edges.len()
        );
    }

    FixResult {
        saved,
        removed_edges: outcome.removed_edges,
    }
    .render(mode);

    Ok(())
}
