//! Core domain logic for taskgraph
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Task, Subtask, TaskRef, TaskCollection)
//! - `services/` - Graph validation/repair, recommendation, lifecycle
//! - `ports/` - Trait definitions for external dependencies

pub mod models;
pub mod ports;
pub mod services;
