//! Command implementations

mod add;
mod depend;
mod fix;
mod list;
mod next;
mod parse_id;
mod remove;
mod set_status;
mod show;
mod validate;
mod workspace;

pub use add::{AddArgs, add};
pub use depend::depend;
pub use fix::fix;
pub use list::list;
pub use next::{NextArgs, next};
pub use parse_id::parse_id;
pub use remove::remove;
pub use set_status::set_status;
pub use show::show;
pub use validate::validate;
pub use workspace::Workspace;
