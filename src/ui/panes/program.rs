//! Program pane rendering with per-opcode highlighting
//!
//! Displays the filtered instruction stream (comments never reach the
//! engine, so they are not shown) wrapped into fixed-width rows, with the
//! instruction at the program counter highlighted. The scroll logic keeps
//! the highlighted instruction at a stable visual row while the machine
//! runs, the same way an editor keeps the cursor line in place.

use crate::loader::opcode::Opcode;
use crate::loader::program::Program;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Scroll state for the program pane
pub struct ProgramScrollState {
    pub offset: usize,
    /// Visual row the current instruction is pinned to (None = center on
    /// first render)
    pub target_row: Option<usize>,
}

impl ProgramScrollState {
    pub fn new() -> ProgramScrollState {
        ProgramScrollState {
            offset: 0,
            target_row: None,
        }
    }
}

impl Default for ProgramScrollState {
    fn default() -> ProgramScrollState {
        ProgramScrollState::new()
    }
}

fn opcode_style(op: Opcode) -> Style {
    match op {
        Opcode::MoveRight | Opcode::MoveLeft => Style::default().fg(DEFAULT_THEME.op_move),
        Opcode::Increment | Opcode::Decrement => Style::default().fg(DEFAULT_THEME.op_arith),
        Opcode::Output | Opcode::Input => Style::default().fg(DEFAULT_THEME.op_io),
        Opcode::LoopStart | Opcode::LoopEnd => Style::default()
            .fg(DEFAULT_THEME.op_bracket)
            .add_modifier(Modifier::BOLD),
    }
}

/// Render the program pane
pub fn render_program_pane(
    frame: &mut Frame,
    area: Rect,
    program: &Program,
    pc: usize,
    is_focused: bool,
    scroll_state: &mut ProgramScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Program (pc {}) ", pc))
        .borders(Borders::ALL)
        .border_style(border_style);

    if program.is_empty() {
        let paragraph = Paragraph::new("(empty program)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let ops = program.ops();

    // Gutter is "12345 " wide; the rest of the inner width holds opcodes
    let gutter_width = 6;
    let cols = (area.width.saturating_sub(2 + gutter_width)).max(1) as usize;
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let total_rows = ops.len().div_ceil(cols);

    // The instruction under pc, clamped so a completed program keeps its
    // last row in view
    let active_index = pc.min(ops.len() - 1);
    let active_row = active_index / cols;

    // Initialize the pinned row to center on first render
    if scroll_state.target_row.is_none() {
        scroll_state.target_row = Some(visible_height / 2);
    }
    let target_row = scroll_state
        .target_row
        .unwrap_or(0)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_row = Some(target_row);

    // Keep the active row at the pinned visual row
    scroll_state.offset = active_row.saturating_sub(target_row);
    if total_rows > visible_height {
        let max_scroll = total_rows - visible_height;
        scroll_state.offset = scroll_state.offset.min(max_scroll);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = (scroll_state.offset..total_rows)
        .take(visible_height)
        .map(|row| {
            let row_start = row * cols;
            let row_ops = &ops[row_start..(row_start + cols).min(ops.len())];
            let is_active_row = row == active_row;

            let gutter_style = if is_active_row {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut spans = vec![Span::styled(format!("{:>5} ", row_start), gutter_style)];

            for (i, op) in row_ops.iter().enumerate() {
                let index = row_start + i;
                let style = if index == pc {
                    Style::default()
                        .bg(DEFAULT_THEME.secondary)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD)
                } else if is_active_row {
                    opcode_style(*op).bg(DEFAULT_THEME.current_cell_bg)
                } else {
                    opcode_style(*op)
                };
                spans.push(Span::styled(op.to_char().to_string(), style));
            }

            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
