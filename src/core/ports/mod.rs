//! Port traits (interfaces) for external collaborators
//!
//! These traits define the boundaries between the core and the systems
//! that supply and persist its data (task stores, complexity reports).
//!
//! Implementations live in the `adapters` module.
//!
//! ## Design Principle
//!
//! The core domain logic depends only on these traits, never on concrete
//! implementations. This enables:
//!
//! - **Testability**: Mock implementations for unit tests
//! - **Flexibility**: Swap implementations without changing business logic
//! - **Clarity**: Clear boundaries between layers

mod complexity_provider;
mod task_repo;

pub use complexity_provider::ComplexityReportProvider;
pub use task_repo::TaskRepository;
