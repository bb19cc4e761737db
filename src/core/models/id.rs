//! Task and subtask identifiers
//!
//! Top-level tasks are identified by a positive integer. Subtasks are only
//! unique within their parent, so they are addressed by the composite pair
//! `(parent, subtask)`, rendered as `"<parent>.<subtask>"`.
//!
//! # Examples
//!
//! ```
//! use taskgraph::core::models::TaskRef;
//!
//! let id: TaskRef = "12.3".parse().unwrap();
//! assert_eq!(id, TaskRef::subtask(12, 3));
//! assert_eq!(id.to_string(), "12.3");
//!
//! assert!("abc".parse::<TaskRef>().is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Identifier of a top-level task
pub type TaskId = u32;

/// Errors that can occur when parsing an identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Not a positive integer or a dotted pair of positive integers
    #[error("invalid task id format: {0:?}")]
    InvalidIdFormat(String),
}

/// A reference to a task or to one of its subtasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskRef {
    /// The top-level task (or the parent, for a subtask)
    pub task_id: TaskId,
    /// The subtask within `task_id`, if this references a subtask
    pub subtask_id: Option<u32>,
}

impl TaskRef {
    /// Reference a top-level task
    #[must_use]
    pub const fn task(task_id: TaskId) -> Self {
        Self {
            task_id,
            subtask_id: None,
        }
    }

    /// Reference a subtask of `task_id`
    #[must_use]
    pub const fn subtask(task_id: TaskId, subtask_id: u32) -> Self {
        Self {
            task_id,
            subtask_id: Some(subtask_id),
        }
    }

    /// Whether this references a subtask
    #[must_use]
    pub const fn is_subtask(&self) -> bool {
        self.subtask_id.is_some()
    }
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.subtask_id {
            Some(sub) => write!(f, "{}.{}", self.task_id, sub),
            None => write!(f, "{}", self.task_id),
        }
    }
}

impl FromStr for TaskRef {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_task_id(s)
    }
}

impl From<TaskId> for TaskRef {
    fn from(task_id: TaskId) -> Self {
        Self::task(task_id)
    }
}

fn parse_segment(segment: &str, raw: &str) -> Result<u32, IdError> {
    // u32::from_str accepts a leading '+', which is not an id
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdError::InvalidIdFormat(raw.to_string()));
    }
    match segment.parse::<u32>() {
        Ok(0) | Err(_) => Err(IdError::InvalidIdFormat(raw.to_string())),
        Ok(n) => Ok(n),
    }
}

/// Parse `"5"` or `"5.2"` into a [`TaskRef`]
///
/// Surrounding whitespace is ignored. Every segment must be a positive
/// decimal integer and at most one `.` is allowed.
pub fn parse_task_id(raw: &str) -> Result<TaskRef, IdError> {
    let trimmed = raw.trim();
    match trimmed.split_once('.') {
        Some((task, sub)) => Ok(TaskRef::subtask(
            parse_segment(task, raw)?,
            parse_segment(sub, raw)?,
        )),
        None => Ok(TaskRef::task(parse_segment(trimmed, raw)?)),
    }
}

/// Render an identifier, omitting the subtask segment when absent
#[must_use]
pub fn format_task_id(task_id: TaskId, subtask_id: Option<u32>) -> String {
    TaskRef {
        task_id,
        subtask_id,
    }
    .to_string()
}

/// Anything that can name a task: a raw id string, an integer, or a [`TaskRef`]
pub trait IntoTaskRef {
    /// Resolve into a structured reference
    fn into_task_ref(self) -> Result<TaskRef, IdError>;
}

impl IntoTaskRef for TaskRef {
    fn into_task_ref(self) -> Result<TaskRef, IdError> {
        Ok(self)
    }
}

impl IntoTaskRef for TaskId {
    fn into_task_ref(self) -> Result<TaskRef, IdError> {
        if self == 0 {
            return Err(IdError::InvalidIdFormat(self.to_string()));
        }
        Ok(TaskRef::task(self))
    }
}

impl IntoTaskRef for &str {
    fn into_task_ref(self) -> Result<TaskRef, IdError> {
        parse_task_id(self)
    }
}

impl IntoTaskRef for &String {
    fn into_task_ref(self) -> Result<TaskRef, IdError> {
        parse_task_id(self)
    }
}

/// Structural equality after parsing, so `"5"` and `5` compare equal
///
/// Identifiers that fail to parse are never equal to anything.
#[must_use]
pub fn ids_equal(a: impl IntoTaskRef, b: impl IntoTaskRef) -> bool {
    match (a.into_task_ref(), b.into_task_ref()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl Serialize for TaskRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Str(String),
        }

        // A bare integer could name a sibling subtask or a top-level task,
        // so references must be written as strings.
        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Err(serde::de::Error::custom(format!(
                "ambiguous reference {n}: write \"{n}\" for a task or \"<parent>.{n}\" for a subtask"
            ))),
            Raw::Str(s) => parse_task_id(&s).map_err(serde::de::Error::custom),
        }
    }
}
