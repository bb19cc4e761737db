//! Task status

use serde::{Deserialize, Serialize};

/// Lifecycle status shared by tasks and subtasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Pending,
    /// Currently being worked on
    InProgress,
    /// Completed
    Done,
    /// Awaiting review
    Review,
    /// Postponed
    Deferred,
    /// Abandoned
    Cancelled,
}

impl TaskStatus {
    /// Whether dependents waiting on this status are unblocked
    ///
    /// Only `done` satisfies a dependency; a cancelled prerequisite still
    /// blocks until the edge is removed.
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Done)
    }

    /// Whether no further work is expected
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in-progress"),
            Self::Done => write!(f, "done"),
            Self::Review => write!(f, "review"),
            Self::Deferred => write!(f, "deferred"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "pending" | "todo" => Ok(Self::Pending),
            "in-progress" | "inprogress" | "started" => Ok(Self::InProgress),
            "done" | "complete" | "completed" => Ok(Self::Done),
            "review" => Ok(Self::Review),
            "deferred" => Ok(Self::Deferred),
            "cancelled" | "canceled" => Ok(Self::Cancelled),
            _ => Err(format!(
                "Invalid status: {s}. Use: pending, in-progress, done, review, deferred, cancelled"
            )),
        }
    }
}
