//! Adapter implementations for port traits
//!
//! This module contains concrete implementations that handle I/O:
//!
//! - `json/` - `tasks.json` task store and complexity report files

pub mod json;

pub use json::{JsonComplexityReportProvider, JsonTaskRepository};
