//! CLI definitions and entry point

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use super::commands::{self, AddArgs, NextArgs, Workspace};
use taskgraph::output::OutputMode;

/// taskgraph - Validate, repair, and plan hierarchical task lists
#[derive(Parser, Debug)]
#[command(
    name = "taskgraph",
    version,
    about = "Validate, repair, and plan hierarchical task lists",
    long_about = "Keep a task list's dependency graph consistent.\n\n\
                  Finds dangling, self-referencing, and circular dependencies,\n\
                  repairs them, and recommends the next task to work on."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Tasks file (defaults to the configured store)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report missing, self-referencing, and circular dependencies
    Validate,

    /// Remove invalid dependencies and break cycles
    Fix {
        /// Show what would be removed without writing
        #[arg(long)]
        dry_run: bool,
    },

    /// Recommend the next task to work on
    Next(NextArgs),

    /// List tasks
    List {
        /// Only tasks with this status
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show one task or subtask
    Show {
        /// Task id ("5") or subtask id ("5.2")
        id: String,

        /// Only subtasks with this status
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Add a task, or a subtask with --parent
    Add(AddArgs),

    /// Add or remove a dependency between two tasks
    Depend {
        /// Task that depends
        from: String,

        /// Task it depends on
        to: String,

        /// Remove the dependency instead
        #[arg(long)]
        remove: bool,
    },

    /// Set the status of a task or subtask
    SetStatus {
        /// Task id ("5") or subtask id ("5.2")
        id: String,

        /// New status
        status: String,
    },

    /// Remove a task or subtask and every reference to it
    Remove {
        /// Task id ("5") or subtask id ("5.2")
        id: String,
    },

    /// Parse and normalise a task id
    ParseId {
        /// Raw id, e.g. "5" or "5.2"
        raw: String,
    },

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let Some(command) = cli.command else {
        if output_mode == OutputMode::Json {
            println!(
                "{}",
                serde_json::json!({
                    "version": taskgraph::VERSION,
                    "hint": "Use --help for usage"
                })
            );
        } else {
            println!("taskgraph v{}", taskgraph::VERSION);
            println!("\nRun 'taskgraph --help' for usage");
        }
        return Ok(());
    };

    let file = cli.file;
    let workspace = || Workspace::open(file.clone());

    match command {
        Command::Validate => commands::validate(&workspace()?, output_mode),
        Command::Fix { dry_run } => commands::fix(&workspace()?, dry_run, output_mode),
        Command::Next(args) => commands::next(&workspace()?, &args, output_mode),
        Command::List { status } => commands::list(&workspace()?, status.as_deref(), output_mode),
        Command::Show { id, status } => {
            commands::show(&workspace()?, &id, status.as_deref(), output_mode)
        },
        Command::Add(args) => commands::add(&workspace()?, &args, output_mode),
        Command::Depend { from, to, remove } => {
            commands::depend(&workspace()?, &from, &to, remove, output_mode)
        },
        Command::SetStatus { id, status } => {
            commands::set_status(&workspace()?, &id, &status, output_mode)
        },
        Command::Remove { id } => commands::remove(&workspace()?, &id, output_mode),
        Command::ParseId { raw } => commands::parse_id(&raw, output_mode),
        Command::Version => {
            if output_mode == OutputMode::Json {
                println!("{}", serde_json::json!({ "version": taskgraph::VERSION }));
            } else {
                println!("taskgraph v{}", taskgraph::VERSION);
            }
            Ok(())
        },
    }
}
