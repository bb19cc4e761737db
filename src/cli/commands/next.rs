//! Recommend the next task

use clap::Args;
use taskgraph::output::{NextResult, OutputMode};

use super::Workspace;
use super::workspace::parse_top_level;

/// Options for `taskgraph next`; unset values come from the config
#[derive(Args, Debug, Default)]
pub struct NextArgs {
    /// Also consider tasks already in progress
    #[arg(long)]
    pub include_in_progress: bool,

    /// Task ids to skip (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Weight of the priority factor
    #[arg(long)]
    pub priority_weight: Option<f64>,

    /// Weight of the dependency-depth factor
    #[arg(long)]
    pub dependency_weight: Option<f64>,

    /// Weight of the complexity factor
    #[arg(long)]
    pub complexity_weight: Option<f64>,

    /// Weight of the due-date factor
    #[arg(long)]
    pub due_date_weight: Option<f64>,
}

/// Rank ready tasks and print the best one
pub fn next(workspace: &Workspace, args: &NextArgs, mode: OutputMode) -> anyhow::Result<()> {
    let mut criteria = workspace.config.criteria();
    criteria.include_in_progress |= args.include_in_progress;
    criteria.exclude = args
        .exclude
        .iter()
        .map(|raw| parse_top_level(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let weights = &mut criteria.weights;
    weights.priority = args.priority_weight.unwrap_or(weights.priority);
    weights.dependency = args.dependency_weight.unwrap_or(weights.dependency);
    weights.complexity = args.complexity_weight.unwrap_or(weights.complexity);
    weights.due_date = args.due_date_weight.unwrap_or(weights.due_date);

    let tasks = workspace.load_annotated()?;
    let result = taskgraph::recommend_next_task(&tasks, &criteria);

    NextResult { result }.render(mode);
    Ok(())
}
