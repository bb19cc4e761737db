//! Mock implementations of port traits for testing
//!
//! These mocks keep state in memory so services can be exercised
//! without real I/O operations.

use std::cell::{Cell, RefCell};

use taskgraph::core::models::{ComplexityReport, TaskCollection};
use taskgraph::core::ports::{ComplexityReportProvider, TaskRepository};

/// Mock implementation of TaskRepository
pub struct MockTaskRepository {
    tasks: RefCell<TaskCollection>,
    saves: Cell<usize>,
}

impl MockTaskRepository {
    pub fn new() -> Self {
        Self::with_tasks(TaskCollection::default())
    }

    pub fn with_tasks(tasks: TaskCollection) -> Self {
        Self {
            tasks: RefCell::new(tasks),
            saves: Cell::new(0),
        }
    }

    /// Current stored collection
    pub fn stored(&self) -> TaskCollection {
        self.tasks.borrow().clone()
    }

    /// How many times save was called
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl Default for MockTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRepository for MockTaskRepository {
    fn load(&self) -> anyhow::Result<TaskCollection> {
        Ok(self.tasks.borrow().clone())
    }

    fn save(&self, tasks: &TaskCollection) -> anyhow::Result<()> {
        *self.tasks.borrow_mut() = tasks.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}

/// Mock implementation of ComplexityReportProvider
#[derive(Default)]
pub struct MockComplexityProvider {
    report: Option<ComplexityReport>,
}

impl MockComplexityProvider {
    pub fn with_scores(scores: &[(u32, f64)]) -> Self {
        Self {
            report: Some(ComplexityReport::from_scores(scores.iter().copied())),
        }
    }
}

impl ComplexityReportProvider for MockComplexityProvider {
    fn report(&self) -> anyhow::Result<Option<ComplexityReport>> {
        Ok(self.report.clone())
    }
}
