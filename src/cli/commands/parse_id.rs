//! Parse a task id

use taskgraph::core::models::parse_task_id;
use taskgraph::output::{OutputMode, ParseIdResult};

/// Parse `raw` and print its parts
pub fn parse_id(raw: &str, mode: OutputMode) -> anyhow::Result<()> {
    let id = parse_task_id(raw)?;
    ParseIdResult::from(id).render(mode);
    Ok(())
}
