//! JSON file adapters
//!
//! - [`JsonTaskRepository`] - the task store, a bare array of tasks or an
//!   object with a `tasks` array
//! - [`JsonComplexityReportProvider`] - a complexity analysis report

mod complexity;
mod repository;

pub use complexity::JsonComplexityReportProvider;
pub use repository::JsonTaskRepository;
