use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::app::{AppState, Mode, Tab};

use super::text::clip_to_width;

pub fn status_text(app: &AppState, tab: &Tab) -> String {
    let mode = match app.mode {
        Mode::Normal => "NORMAL",
        Mode::CommandBar => "COMMAND",
    };
    let history = tab.browser().history();
    let mut text = format!(
        "{} | history {}/{} | renders {} | {}",
        tab.location(),
        history.index() + 1,
        history.len(),
        tab.router().render_count(),
        mode
    );
    if !app.status.message.is_empty() {
        text.push_str(" | ");
        text.push_str(&app.status.message);
    }
    text
}

pub fn debug_text(app: &AppState, tab: &Tab) -> String {
    let command_id = app
        .status
        .last_action_id
        .map(|id| id.as_str())
        .unwrap_or("-");
    format!(
        "cmd={command_id} | {} | full-loads={} | boots={}",
        tab.snapshot().summary(),
        tab.browser().full_loads(),
        tab.boots()
    )
}

pub fn draw_chrome(frame: &mut Frame<'_>, area: Rect, app: &AppState, tab: &Tab) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let width = usize::from(area.width);

    let status = Paragraph::new(clip_to_width(&status_text(app, tab), width))
        .style(Style::default().fg(Color::Black).bg(Color::Gray));
    let top = Rect::new(area.x, area.y, area.width, 1);
    frame.render_widget(status, top);

    if app.debug_status_visible && area.height >= 2 {
        let debug = Paragraph::new(clip_to_width(&debug_text(app, tab), width))
            .style(Style::default().fg(Color::DarkGray));
        let bottom = Rect::new(area.x, area.y + 1, area.width, area.height - 1);
        frame.render_widget(debug, bottom);
    }
}
