mod core;
mod dispatch;
mod parse;
mod spec;
mod types;

pub use dispatch::{CommandDispatchResult, dispatch};
pub use parse::parse_command_text;
pub use spec::{command_registry, command_usage, find_command_spec};
pub use types::{ActionId, ArgKind, ArgSpec, Command, CommandOutcome, CommandSpec};
