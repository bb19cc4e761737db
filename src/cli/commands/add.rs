//! Add a task or subtask

use chrono::NaiveDate;
use clap::Args;
use taskgraph::core::models::{Priority, TaskRef, parse_task_id};
use taskgraph::core::ports::TaskRepository;
use taskgraph::core::services::{NewSubtask, NewTask, lifecycle};
use taskgraph::output::{OperationResult, OutputMode};

use super::Workspace;
use super::workspace::parse_top_level;

/// Options for `taskgraph add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Title
    pub title: String,

    /// Description
    #[arg(short, long, default_value = "")]
    pub description: String,

    /// Priority: low, medium, high
    #[arg(short, long)]
    pub priority: Option<String>,

    /// Dependencies (comma-separated ids)
    #[arg(long, value_delimiter = ',')]
    pub depends_on: Vec<String>,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<NaiveDate>,

    /// Add as a subtask of this task
    #[arg(long)]
    pub parent: Option<String>,
}

/// Append a task, or a subtask when `--parent` is given
pub fn add(workspace: &Workspace, args: &AddArgs, mode: OutputMode) -> anyhow::Result<()> {
    let priority = args
        .priority
        .as_deref()
        .map(str::parse::<Priority>)
        .transpose()
        .map_err(anyhow::Error::msg)?;

    let id: TaskRef = match &args.parent {
        Some(parent) => {
            if args.due.is_some() {
                anyhow::bail!("subtasks do not carry a due date");
            }
            let parent = parse_top_level(parent)?;
            let dependencies = args
                .depends_on
                .iter()
                .map(|raw| parse_task_id(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let new = NewSubtask {
                title: args.title.clone(),
                description: args.description.clone(),
                priority,
                dependencies,
            };
            workspace.tasks.update(|tasks| Ok((lifecycle::add_subtask(tasks, parent, new)?, true)))?
        },
        None => {
            let dependencies = args
                .depends_on
                .iter()
                .map(|raw| parse_top_level(raw))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let new = NewTask {
                title: args.title.clone(),
                description: args.description.clone(),
                priority: priority.unwrap_or_default(),
                dependencies,
                due_date: args.due,
                ..NewTask::default()
            };
            workspace.tasks.update(|tasks| Ok((lifecycle::add_task(tasks, new)?, true)))?
        },
    };

    OperationResult {
        success: true,
        message: format!("Added {id}: {}", args.title),
    }
    .render(mode);

    Ok(())
}
