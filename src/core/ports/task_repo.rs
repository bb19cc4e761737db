//! Task repository port
//!
//! Defines the interface for loading and persisting the task collection.

use super::super::models::TaskCollection;

/// Repository holding the full task collection
///
/// The core never performs I/O itself. Callers load a collection through a
/// repository, run graph or recommendation operations on it, and save any
/// returned collection back.
pub trait TaskRepository {
    /// Load the full collection
    ///
    /// A store that does not exist yet loads as an empty collection.
    fn load(&self) -> anyhow::Result<TaskCollection>;

    /// Replace the stored collection
    fn save(&self, tasks: &TaskCollection) -> anyhow::Result<()>;

    /// Load, apply `update`, and save only if it reports a change
    ///
    /// Returns whatever `update` returned alongside the change flag.
    fn update<T>(
        &self,
        update: impl FnOnce(&mut TaskCollection) -> anyhow::Result<(T, bool)>,
    ) -> anyhow::Result<T>
    where
        Self: Sized,
    {
        let mut tasks = self.load()?;
        let (value, changed) = update(&mut tasks)?;
        if changed {
            self.save(&tasks)?;
        }
        Ok(value)
    }
}
