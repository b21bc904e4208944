use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::dom::{NodeId, TextLine};

use super::text::clip_to_width;

fn segment_style(line: &TextLine, link: Option<NodeId>, focused: Option<NodeId>) -> Style {
    let mut style = Style::default();
    if line.heading {
        style = style.add_modifier(Modifier::BOLD);
    }
    match link {
        Some(link) if Some(link) == focused => style
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        Some(_) => style.fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
        None => style,
    }
}

/// Styled, width-clipped display lines for the page text.
pub fn page_view_lines(lines: &[TextLine], focused: Option<NodeId>, width: usize) -> Vec<Line<'static>> {
    lines
        .iter()
        .map(|line| {
            let mut remaining = width;
            let mut spans = Vec::with_capacity(line.segments.len());
            for segment in &line.segments {
                if remaining == 0 {
                    break;
                }
                let text = clip_to_width(&segment.text, remaining);
                remaining = remaining.saturating_sub(text.width());
                spans.push(Span::styled(text, segment_style(line, segment.link, focused)));
            }
            Line::from(spans)
        })
        .collect()
}

/// First line to show so the focused link stays on screen.
pub fn scroll_offset(lines: &[TextLine], focused: Option<NodeId>, height: usize) -> usize {
    let Some(focused) = focused else {
        return 0;
    };
    let Some(row) = lines
        .iter()
        .position(|line| line.segments.iter().any(|seg| seg.link == Some(focused)))
    else {
        return 0;
    };
    if height == 0 || row < height {
        0
    } else {
        row + 1 - height
    }
}

pub fn draw_page(frame: &mut Frame<'_>, area: Rect, lines: &[TextLine], focused: Option<NodeId>) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let offset = scroll_offset(lines, focused, usize::from(area.height));
    let visible = page_view_lines(&lines[offset.min(lines.len())..], focused, usize::from(area.width));
    frame.render_widget(Paragraph::new(visible), area);
}
