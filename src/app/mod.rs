mod core;
mod event_loop;
mod script;
mod state;
mod tab;
pub(crate) mod terminal_session;

#[cfg(test)]
mod tests;

pub use core::App;
pub use script::ScriptReport;
pub use state::{AppState, Mode, StatusState};
pub use tab::Tab;
