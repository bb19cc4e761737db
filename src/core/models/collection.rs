//! Well-formed task collections
//!
//! A [`TaskCollection`] can only be built from records that all carry a
//! positive, unique id (and subtasks with positive ids unique within their
//! parent). Graph and recommendation operations take a collection rather
//! than a raw slice, so structural problems surface once, at construction,
//! and never half-way through a repair.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::id::{TaskId, TaskRef};
use super::task::{Subtask, Task};

/// Structural problems with a task collection
#[derive(Debug, Error)]
pub enum CollectionError {
    /// Input was neither an array nor an object with a `tasks` array
    #[error("task collection must be an array (or an object with a \"tasks\" array)")]
    NotAnArray,

    /// A record has no `id` field
    #[error("task record at index {index} has no id")]
    MissingId {
        /// Position in the input array
        index: usize,
    },

    /// A record could not be read as a task
    #[error("task record at index {index} is malformed: {source}")]
    InvalidRecord {
        /// Position in the input array
        index: usize,
        /// Underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// Ids must be positive
    #[error("invalid id {0}: ids must be positive")]
    InvalidId(TaskRef),

    /// Two tasks share an id
    #[error("duplicate task id {0}")]
    DuplicateId(TaskId),

    /// Two subtasks of the same parent share an id
    #[error("duplicate subtask id {0}")]
    DuplicateSubtaskId(TaskRef),

    /// The referenced task or subtask does not exist
    #[error("task {0} not found")]
    NotFound(TaskRef),
}

/// An ordered collection of tasks with unique ids
///
/// The collection remembers the highest task id (and per parent, the highest
/// subtask id) it has ever held, so ids freed by a removal are not handed
/// out again while the collection lives.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct TaskCollection {
    tasks: Vec<Task>,
    #[serde(skip)]
    last_task_id: TaskId,
    #[serde(skip)]
    last_subtask_ids: HashMap<TaskId, u32>,
}

impl PartialEq for TaskCollection {
    fn eq(&self, other: &Self) -> bool {
        self.tasks == other.tasks
    }
}

impl TaskCollection {
    /// Build a collection, rejecting zero or duplicate ids
    pub fn new(tasks: Vec<Task>) -> Result<Self, CollectionError> {
        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            if task.id == 0 {
                return Err(CollectionError::InvalidId(task.task_ref()));
            }
            if !seen.insert(task.id) {
                return Err(CollectionError::DuplicateId(task.id));
            }
            check_subtasks(task.id, &task.subtasks)?;
        }
        let last_task_id = tasks.iter().map(|t| t.id).max().unwrap_or(0);
        Ok(Self {
            tasks,
            last_task_id,
            last_subtask_ids: HashMap::new(),
        })
    }

    /// Build a collection from deserialized JSON
    ///
    /// Accepts a bare array of task records or an object whose `tasks` key
    /// holds one.
    pub fn from_value(value: Value) -> Result<Self, CollectionError> {
        let records = match value {
            Value::Array(records) => records,
            Value::Object(mut map) => match map.remove("tasks") {
                Some(Value::Array(records)) => records,
                _ => return Err(CollectionError::NotAnArray),
            },
            _ => return Err(CollectionError::NotAnArray),
        };

        let mut tasks = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            if record.get("id").is_none_or(Value::is_null) {
                return Err(CollectionError::MissingId { index });
            }
            let task = serde_json::from_value(record)
                .map_err(|source| CollectionError::InvalidRecord { index, source })?;
            tasks.push(task);
        }
        Self::new(tasks)
    }

    /// All tasks in their natural (array) order
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Number of top-level tasks
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether there are no tasks
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterate over tasks in array order
    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    /// Find a task by id
    #[must_use]
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Find a subtask by its composite reference
    #[must_use]
    pub fn get_subtask(&self, id: &TaskRef) -> Option<&Subtask> {
        let sub = id.subtask_id?;
        self.get(id.task_id)?.subtask(sub)
    }

    /// Whether a task or subtask with this reference exists
    #[must_use]
    pub fn contains(&self, id: &TaskRef) -> bool {
        match id.subtask_id {
            Some(_) => self.get_subtask(id).is_some(),
            None => self.get(id.task_id).is_some(),
        }
    }

    /// Highest task id this collection has held, including removed tasks
    #[must_use]
    pub const fn last_task_id(&self) -> TaskId {
        self.last_task_id
    }

    /// Highest subtask id `parent` has held, including removed subtasks
    #[must_use]
    pub fn last_subtask_id(&self, parent: TaskId) -> u32 {
        let current = self
            .get(parent)
            .and_then(|t| t.subtasks.iter().map(|s| s.id).max())
            .unwrap_or(0);
        self.last_subtask_ids.get(&parent).map_or(current, |&removed| removed.max(current))
    }

    pub(crate) fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut [Task] {
        &mut self.tasks
    }

    pub(crate) fn push(&mut self, task: Task) -> Result<(), CollectionError> {
        if task.id == 0 {
            return Err(CollectionError::InvalidId(task.task_ref()));
        }
        if self.get(task.id).is_some() {
            return Err(CollectionError::DuplicateId(task.id));
        }
        check_subtasks(task.id, &task.subtasks)?;
        self.last_task_id = self.last_task_id.max(task.id);
        self.tasks.push(task);
        Ok(())
    }

    pub(crate) fn remove(&mut self, id: TaskId) -> Option<Task> {
        let pos = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(pos))
    }

    pub(crate) fn remove_subtask(&mut self, id: &TaskRef) -> Option<Subtask> {
        let sub = id.subtask_id?;
        let parent = self.get_mut(id.task_id)?;
        let pos = parent.subtasks.iter().position(|s| s.id == sub)?;
        let removed = parent.subtasks.remove(pos);
        let last = self.last_subtask_ids.entry(id.task_id).or_default();
        *last = (*last).max(sub);
        Some(removed)
    }
}

impl<'a> IntoIterator for &'a TaskCollection {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

impl TryFrom<Vec<Task>> for TaskCollection {
    type Error = CollectionError;

    fn try_from(tasks: Vec<Task>) -> Result<Self, Self::Error> {
        Self::new(tasks)
    }
}

fn check_subtasks(parent: TaskId, subtasks: &[Subtask]) -> Result<(), CollectionError> {
    let mut seen = HashSet::with_capacity(subtasks.len());
    for sub in subtasks {
        let id = TaskRef::subtask(parent, sub.id);
        if sub.id == 0 {
            return Err(CollectionError::InvalidId(id));
        }
        if !seen.insert(sub.id) {
            return Err(CollectionError::DuplicateSubtaskId(id));
        }
    }
    Ok(())
}
