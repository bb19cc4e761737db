//! JSON-file task repository
//!
//! Implements the `TaskRepository` port trait on a single JSON file. When
//! the file wraps the task array in an object (`{"tasks": [...], ...}`),
//! the other keys are preserved on save.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;

use crate::core::models::TaskCollection;
use crate::core::ports::TaskRepository;

/// Task repository backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonTaskRepository {
    /// Path to the tasks file
    path: PathBuf,
}

impl JsonTaskRepository {
    /// Create a repository for the given file
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The file this repository reads and writes
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> anyhow::Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("{} is not valid JSON", self.path.display()))?;
        Ok(Some(value))
    }
}

impl TaskRepository for JsonTaskRepository {
    fn load(&self) -> anyhow::Result<TaskCollection> {
        let Some(document) = self.read_document()? else {
            log::debug!("{} does not exist, starting empty", self.path.display());
            return Ok(TaskCollection::default());
        };
        let tasks = TaskCollection::from_value(document)
            .with_context(|| format!("invalid task collection in {}", self.path.display()))?;
        log::debug!("loaded {} task(s) from {}", tasks.len(), self.path.display());
        Ok(tasks)
    }

    fn save(&self, tasks: &TaskCollection) -> anyhow::Result<()> {
        let tasks_value = serde_json::to_value(tasks)?;
        let document = match self.read_document()? {
            Some(Value::Object(mut map)) => {
                map.insert("tasks".to_string(), tasks_value);
                Value::Object(map)
            },
            _ => tasks_value,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let mut content = serde_json::to_string_pretty(&document)?;
        content.push('\n');
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))?;

        log::debug!("saved {} task(s) to {}", tasks.len(), self.path.display());
        Ok(())
    }
}
