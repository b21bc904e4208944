use crate::command::ActionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    CommandBar,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Index into the document's links, in document order.
    pub focus: Option<usize>,
    pub debug_status_visible: bool,
    pub mode: Mode,
    pub status: StatusState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            focus: None,
            debug_status_visible: false,
            mode: Mode::Normal,
            status: StatusState::default(),
        }
    }
}
