use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub page: Rect,
    pub status: Rect,
    /// Bottom row for the command bar, present only while it is open.
    pub command_bar: Option<Rect>,
}

pub fn split_layout(area: Rect, debug_status_visible: bool, command_bar_open: bool) -> UiLayout {
    let status_height = if debug_status_visible { 2 } else { 1 };
    let bar_height = u16::from(command_bar_open);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(status_height),
            Constraint::Length(bar_height),
        ])
        .split(area);

    UiLayout {
        page: chunks[0],
        status: chunks[1],
        command_bar: command_bar_open.then_some(chunks[2]),
    }
}
