//! Domain models for taskgraph
//!
//! Pure data structures with no I/O dependencies.
//!
//! - [`Task`] / [`Subtask`] - Work items and their children
//! - [`TaskRef`] - A task or subtask identifier (`"5"`, `"5.2"`)
//! - [`TaskCollection`] - A structurally valid set of tasks
//! - [`ComplexityReport`] - External complexity scores, read-only

mod collection;
mod complexity;
mod id;
mod priority;
mod status;
mod task;

pub use collection::{CollectionError, TaskCollection};
pub use complexity::{ComplexityEntry, ComplexityReport};
pub use id::{IdError, IntoTaskRef, TaskId, TaskRef, format_task_id, ids_equal, parse_task_id};
pub use priority::Priority;
pub use status::TaskStatus;
pub use task::{Subtask, Task};
