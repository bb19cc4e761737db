//! Builders for tasks and collections

use chrono::NaiveDate;
use taskgraph::core::models::{
    Priority, Subtask, Task, TaskCollection, TaskId, TaskRef, TaskStatus,
};

/// Fluent builder for a [`Task`] titled "Task N"
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: TaskId) -> Self {
        Self {
            task: Task::new(id, format!("Task {id}")),
        }
    }

    pub fn deps(mut self, deps: &[TaskId]) -> Self {
        self.task.dependencies = deps.to_vec();
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.task.status = status;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.task.priority = priority;
        self
    }

    pub fn due(mut self, date: &str) -> Self {
        self.task.due_date = Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap());
        self
    }

    pub fn complexity(mut self, score: f64) -> Self {
        self.task.complexity_score = Some(score);
        self
    }

    pub fn subtask(mut self, id: u32, deps: &[TaskRef]) -> Self {
        let mut subtask = Subtask::new(id, format!("Subtask {}.{id}", self.task.id));
        subtask.dependencies = deps.to_vec();
        self.task.subtasks.push(subtask);
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}

/// A collection that must be well-formed
pub fn collection(tasks: Vec<Task>) -> TaskCollection {
    TaskCollection::new(tasks).expect("fixture collection is well-formed")
}

/// Tasks depending on each other in a straight line: 1 <- 2 <- ... <- n
pub fn chain(n: TaskId) -> TaskCollection {
    collection(
        (1..=n)
            .map(|id| {
                let deps: Vec<TaskId> = if id == 1 { vec![] } else { vec![id - 1] };
                TaskBuilder::new(id).deps(&deps).build()
            })
            .collect(),
    )
}
