//! Lifecycle service - creating, updating, and removing tasks
//!
//! Every operation keeps the collection structurally valid. Removing a task
//! or subtask also strips every dependency entry pointing at it, so removal
//! never leaves orphaned references behind.

use chrono::NaiveDate;
use thiserror::Error;

use crate::core::models::{
    CollectionError, Priority, Subtask, Task, TaskCollection, TaskId, TaskRef, TaskStatus,
};
use crate::core::services::graph::DependencyGraph;

/// Errors from lifecycle operations
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The collection rejected the change
    #[error(transparent)]
    Collection(#[from] CollectionError),

    /// A task or subtask cannot depend on itself
    #[error("{0} cannot depend on itself")]
    SelfDependency(TaskRef),

    /// The dependency target does not exist
    #[error("dependency {0} does not exist")]
    UnknownDependency(TaskRef),

    /// The new edge would close a cycle
    #[error("making {from} depend on {to} would create a cycle")]
    WouldCreateCycle {
        /// The dependent task
        from: TaskId,
        /// The dependency
        to: TaskId,
    },

    /// A subtask reference was expected
    #[error("{0} is not a subtask reference")]
    NotASubtask(TaskRef),

    /// The highest possible id is already taken
    #[error("no ids left after {0}")]
    IdSpaceExhausted(TaskRef),
}

/// Fields for a task created by [`add_task`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTask {
    /// What needs to be done
    pub title: String,
    /// Longer explanation
    pub description: String,
    /// Implementation notes
    pub details: Option<String>,
    /// Priority level
    pub priority: Priority,
    /// Task ids that must be done first
    pub dependencies: Vec<TaskId>,
    /// Optional deadline
    pub due_date: Option<NaiveDate>,
}

/// Fields for a subtask created by [`add_subtask`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSubtask {
    /// What needs to be done
    pub title: String,
    /// Longer explanation
    pub description: String,
    /// Priority; inherits the parent's when absent
    pub priority: Option<Priority>,
    /// Fully qualified references that must be done first
    pub dependencies: Vec<TaskRef>,
}

/// Id for the next new task: one past the highest id the collection has held
pub fn next_task_id(tasks: &TaskCollection) -> Result<TaskId, LifecycleError> {
    let last = tasks.last_task_id();
    last
        .checked_add(1)
        .ok_or(LifecycleError::IdSpaceExhausted(TaskRef::task(last)))
}

/// Id for the next subtask of `parent`
pub fn next_subtask_id(tasks: &TaskCollection, parent: TaskId) -> Result<u32, LifecycleError> {
    let last = tasks.last_subtask_id(parent);
    last
        .checked_add(1)
        .ok_or(LifecycleError::IdSpaceExhausted(TaskRef::subtask(parent, last)))
}

/// Append a new pending task, returning its reference
pub fn add_task(tasks: &mut TaskCollection, new: NewTask) -> Result<TaskRef, LifecycleError> {
    if let Some(dep) = new.dependencies.iter().find(|d| tasks.get(**d).is_none()) {
        return Err(LifecycleError::UnknownDependency(TaskRef::task(*dep)));
    }

    let id = next_task_id(tasks)?;
    let mut task = Task::new(id, new.title);
    task.description = new.description;
    task.details = new.details;
    task.priority = new.priority;
    task.dependencies = new.dependencies;
    task.due_date = new.due_date;
    tasks.push(task)?;

    log::debug!("added task {id}");
    Ok(TaskRef::task(id))
}

/// Append a new pending subtask to `parent`, returning its reference
pub fn add_subtask(
    tasks: &mut TaskCollection,
    parent: TaskId,
    new: NewSubtask,
) -> Result<TaskRef, LifecycleError> {
    if let Some(dep) = new.dependencies.iter().find(|d| !tasks.contains(d)) {
        return Err(LifecycleError::UnknownDependency(*dep));
    }

    if tasks.get(parent).is_none() {
        return Err(CollectionError::NotFound(TaskRef::task(parent)).into());
    }
    let id = next_subtask_id(tasks, parent)?;
    let task = tasks
        .get_mut(parent)
        .ok_or(CollectionError::NotFound(TaskRef::task(parent)))?;
    let mut subtask = Subtask::new(id, new.title);
    subtask.description = new.description;
    subtask.priority = new.priority;
    subtask.dependencies = new.dependencies;
    task.subtasks.push(subtask);

    log::debug!("added subtask {parent}.{id}");
    Ok(TaskRef::subtask(parent, id))
}

/// Set the status of a task or subtask, returning the previous status
///
/// Marking a task `done` also marks all of its subtasks `done`.
pub fn set_status(
    tasks: &mut TaskCollection,
    id: &TaskRef,
    status: TaskStatus,
) -> Result<TaskStatus, LifecycleError> {
    let task = tasks.get_mut(id.task_id).ok_or(CollectionError::NotFound(*id))?;

    let previous = match id.subtask_id {
        Some(sub) => {
            let subtask = task.subtask_mut(sub).ok_or(CollectionError::NotFound(*id))?;
            std::mem::replace(&mut subtask.status, status)
        },
        None => {
            if status == TaskStatus::Done {
                for subtask in &mut task.subtasks {
                    subtask.status = TaskStatus::Done;
                }
            }
            std::mem::replace(&mut task.status, status)
        },
    };

    log::debug!("{id}: {previous} -> {status}");
    Ok(previous)
}

/// Remove a task and every reference to it or its subtasks
pub fn remove_task(tasks: &mut TaskCollection, id: TaskId) -> Result<Task, LifecycleError> {
    let removed = tasks.remove(id).ok_or(CollectionError::NotFound(TaskRef::task(id)))?;

    let mut stripped = 0;
    for task in tasks.tasks_mut() {
        let before = task.dependencies.len();
        task.dependencies.retain(|d| *d != id);
        stripped += before - task.dependencies.len();
        for sub in &mut task.subtasks {
            let before = sub.dependencies.len();
            sub.dependencies.retain(|d| d.task_id != id);
            stripped += before - sub.dependencies.len();
        }
    }

    log::debug!("removed task {id}, stripped {stripped} reference(s)");
    Ok(removed)
}

/// Remove a subtask and every reference to it
pub fn remove_subtask(tasks: &mut TaskCollection, id: &TaskRef) -> Result<Subtask, LifecycleError> {
    if id.subtask_id.is_none() {
        return Err(LifecycleError::NotASubtask(*id));
    }
    let removed = tasks.remove_subtask(id).ok_or(CollectionError::NotFound(*id))?;

    for task in tasks.tasks_mut() {
        for other in &mut task.subtasks {
            other.dependencies.retain(|d| d != id);
        }
    }

    log::debug!("removed subtask {id}");
    Ok(removed)
}

/// Make `from` depend on `to`
///
/// Returns `false` when the edge already exists. Rejects self-references,
/// unknown tasks, and edges that would close a cycle.
pub fn add_dependency(
    tasks: &mut TaskCollection,
    from: TaskId,
    to: TaskId,
) -> Result<bool, LifecycleError> {
    if from == to {
        return Err(LifecycleError::SelfDependency(TaskRef::task(from)));
    }
    if tasks.get(to).is_none() {
        return Err(LifecycleError::UnknownDependency(TaskRef::task(to)));
    }
    if DependencyGraph::build(tasks).reaches(to, from) {
        return Err(LifecycleError::WouldCreateCycle { from, to });
    }

    let task = tasks.get_mut(from).ok_or(CollectionError::NotFound(TaskRef::task(from)))?;
    if task.dependencies.contains(&to) {
        return Ok(false);
    }
    task.dependencies.push(to);
    Ok(true)
}

/// Remove the edge `from -> to`, returning whether it existed
pub fn remove_dependency(
    tasks: &mut TaskCollection,
    from: TaskId,
    to: TaskId,
) -> Result<bool, LifecycleError> {
    let task = tasks.get_mut(from).ok_or(CollectionError::NotFound(TaskRef::task(from)))?;
    let before = task.dependencies.len();
    task.dependencies.retain(|d| *d != to);
    Ok(task.dependencies.len() < before)
}
