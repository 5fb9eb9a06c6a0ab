//! Tape pane rendering with a hex dump of the cells
//!
//! Shows the materialized tape as rows of 16 cells with a decimal address
//! gutter, hex cell values, and an ASCII column. The cell under the data
//! pointer is highlighted and kept in view while the machine runs.

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Cells shown per tape row
const CELLS_PER_ROW: usize = 16;

fn ascii_char(byte: u8) -> char {
    if (0x20..0x7f).contains(&byte) {
        byte as char
    } else {
        '.'
    }
}

/// Render the tape pane
pub fn render_tape_pane(
    frame: &mut Frame,
    area: Rect,
    tape: &[u8],
    mem_ptr: usize,
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
        .title(format!(" Tape (ptr {}) ", mem_ptr))
        .borders(Borders::ALL)
        .border_style(border_style);

    let total_rows = tape.len().div_ceil(CELLS_PER_ROW).max(1);
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let pointer_row = mem_ptr / CELLS_PER_ROW;

    // Follow the pointer when it leaves the visible window
    if pointer_row < *scroll_offset {
        *scroll_offset = pointer_row;
    } else if pointer_row >= *scroll_offset + visible_height {
        *scroll_offset = pointer_row + 1 - visible_height;
    }
    if total_rows > visible_height {
        let max_scroll = total_rows - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_lines: Vec<Line> = (*scroll_offset..total_rows)
        .take(visible_height)
        .map(|row| {
            let row_start = row * CELLS_PER_ROW;
            let row_end = (row_start + CELLS_PER_ROW).min(tape.len());
            let row_cells = &tape[row_start.min(tape.len())..row_end];

            let gutter_style = if row == pointer_row {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:>6}  ", row_start), gutter_style)];

            for (i, &cell) in row_cells.iter().enumerate() {
                let index = row_start + i;
                let style = if index == mem_ptr {
                    Style::default()
                        .bg(DEFAULT_THEME.secondary)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD)
                } else if cell != 0 {
                    Style::default().fg(DEFAULT_THEME.number)
                } else {
                    Style::default().fg(DEFAULT_THEME.comment)
                };
                spans.push(Span::styled(format!("{:02x}", cell), style));
                spans.push(Span::raw(" "));
            }

            // Pad short final rows so the ASCII column lines up
            for _ in row_cells.len()..CELLS_PER_ROW {
                spans.push(Span::raw("   "));
            }

            spans.push(Span::styled("|", Style::default().fg(DEFAULT_THEME.comment)));
            for (i, &cell) in row_cells.iter().enumerate() {
                let index = row_start + i;
                let style = if index == mem_ptr {
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD)
                } else if cell != 0 {
                    Style::default().fg(DEFAULT_THEME.fg)
                } else {
                    Style::default().fg(DEFAULT_THEME.comment)
                };
                spans.push(Span::styled(ascii_char(cell).to_string(), style));
            }
            spans.push(Span::styled("|", Style::default().fg(DEFAULT_THEME.comment)));

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
