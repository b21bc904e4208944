use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

/// The `:` prompt, drawn with a software caret so the hidden terminal
/// cursor never needs to move.
pub fn command_bar_line(input: &str, cursor: usize, width: usize) -> Line<'static> {
    let prefix_width = 1;
    let max_text_width = width.saturating_sub(prefix_width).max(1);

    let chars: Vec<char> = input.chars().collect();
    let cursor = cursor.min(chars.len());

    // Scroll left until the caret column fits.
    let mut start = 0usize;
    while start < cursor && columns(&chars[start..cursor]) >= max_text_width {
        start += 1;
    }

    let mut spans = vec![Span::styled(":".to_string(), Style::default().fg(Color::Yellow))];
    let mut used = 0usize;
    for (idx, ch) in chars.iter().enumerate().skip(start) {
        let w = ch.width().unwrap_or(0);
        if used + w > max_text_width {
            break;
        }
        used += w;
        if idx == cursor {
            spans.push(Span::raw(ch.to_string()).reversed());
        } else {
            spans.push(Span::raw(ch.to_string()));
        }
    }
    if cursor == chars.len() && used < max_text_width {
        spans.push(Span::raw(" ").reversed());
    }
    Line::from(spans)
}

pub fn draw_command_bar(frame: &mut Frame<'_>, area: Rect, input: &str, cursor: usize) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    frame.render_widget(Clear, area);
    let line = command_bar_line(input, cursor, usize::from(area.width));
    frame.render_widget(Paragraph::new(line), area);
}

fn columns(chars: &[char]) -> usize {
    chars.iter().map(|ch| ch.width().unwrap_or(0)).sum()
}
