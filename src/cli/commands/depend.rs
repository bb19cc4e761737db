//! Add or remove a dependency edge

use taskgraph::core::ports::TaskRepository;
use taskgraph::core::services::lifecycle;
use taskgraph::output::{OperationResult, OutputMode};

use super::Workspace;
use super::workspace::parse_top_level;

/// Make `from` depend on `to`, or drop that dependency with `remove`
pub fn depend(
    workspace: &Workspace,
    from: &str,
    to: &str,
    remove: bool,
    mode: OutputMode,
) -> anyhow::Result<()> {
    let from = parse_top_level(from)?;
    let to = parse_top_level(to)?;

    let changed = workspace.tasks.update(|tasks| {
        let changed = if remove {
            lifecycle::remove_dependency(tasks, from, to)?
        } else {
            lifecycle::add_dependency(tasks, from, to)?
        };
        Ok((changed, changed))
    })?;

    let message = match (remove, changed) {
        (false, true) => format!("{from} now depends on {to}"),
        (false, false) => format!("{from} already depends on {to}"),
        (true, true) => format!("{from} no longer depends on {to}"),
        (true, false) => format!("{from} did not depend on {to}"),
    };
    OperationResult {
        success: true,
        message,
    }
    .render(mode);

    Ok(())
}
