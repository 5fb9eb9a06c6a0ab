//! Input pane rendering with the feed prompt
//!
//! Shows the program's input byte sequence with the consumed prefix dimmed
//! and the next unread byte highlighted. When the feed prompt is active,
//! typed bytes are shown on an editing line until they are committed to the
//! engine with Enter.

use crate::tape::streams::InputStream;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn printable(byte: u8) -> char {
    if (0x20..0x7f).contains(&byte) {
        byte as char
    } else {
        '·'
    }
}

/// Render the input pane
pub fn render_input_pane(
    frame: &mut Frame,
    area: Rect,
    input: &InputStream,
    pending: &str,
    input_mode: bool,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(
            " Input ({}/{} consumed) ",
            input.consumed(),
            input.bytes().len()
        ))
        .borders(Borders::ALL)
        .border_style(border_style);

    let mut lines: Vec<Line> = Vec::new();

    if input.bytes().is_empty() {
        lines.push(Line::from(Span::styled(
            "(no input)",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    } else {
        let mut spans = Vec::new();
        for (i, &byte) in input.bytes().iter().enumerate() {
            let style = if i == input.consumed() {
                // Next byte to be read
                Style::default()
                    .bg(DEFAULT_THEME.secondary)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD)
            } else if i < input.consumed() {
                Style::default().fg(DEFAULT_THEME.comment)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            spans.push(Span::styled(printable(byte).to_string(), style));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));

    if input_mode {
        lines.push(Line::from(vec![
            Span::styled(
                " feed ",
                Style::default()
                    .bg(DEFAULT_THEME.secondary)
                    .fg(Color::Black)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                format!("{}▏", pending),
                Style::default().fg(DEFAULT_THEME.fg),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            "Enter feeds the typed bytes, Esc cancels",
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    } else {
        let hint = if input.remaining() == 0 {
            "input is exhausted; press i to feed more"
        } else {
            "press i to feed more input"
        };
        lines.push(Line::from(Span::styled(
            hint,
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    }

    // Clamp scroll to the unwrapped line count; wrapping may still add rows
    *scroll_offset = (*scroll_offset).min(lines.len().saturating_sub(1));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}
