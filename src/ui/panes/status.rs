//! Status bar rendering with keybindings and run-state indicators

use crate::ui::theme::DEFAULT_THEME;
use crate::vm::control::RunState;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::time::Duration;

fn format_elapsed(elapsed: Option<Duration>) -> String {
    match elapsed {
        Some(d) => format!("{:.1}s", d.as_secs_f64()),
        None => "-".to_string(),
    }
}

/// Render the status bar at the bottom.
///
/// `faulted` is set after an aborted run and takes over the badge until the
/// next fresh start.
#[allow(clippy::too_many_arguments)]
pub fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    message: &str,
    state: RunState,
    executed: u64,
    cycles: u64,
    elapsed: Option<Duration>,
    quantum: usize,
    input_mode: bool,
    faulted: bool,
) {
    // Split status bar into left and right
    let layout = ratatui::layout::Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            ratatui::layout::Constraint::Percentage(55),
            ratatui::layout::Constraint::Percentage(45),
        ])
        .split(area);

    // Left side: run-state badge, counters, and status message
    let badge_bg = if input_mode {
        DEFAULT_THEME.secondary
    } else if faulted {
        DEFAULT_THEME.error
    } else {
        match state {
            RunState::Running => DEFAULT_THEME.success,
            RunState::Paused => DEFAULT_THEME.primary,
            RunState::Stopped => DEFAULT_THEME.comment,
        }
    };
    let badge_text = if input_mode {
        " INPUT ".to_string()
    } else if faulted {
        " FAULT ".to_string()
    } else {
        format!(" {} ", state.to_string().to_uppercase())
    };

    let left_spans = vec![
        Span::styled(
            badge_text,
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " {} ops | {} cyc | {} | q {} ",
                executed,
                cycles,
                format_elapsed(elapsed),
                quantum
            ),
            Style::default()
                .bg(DEFAULT_THEME.current_cell_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_cell_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_cell_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_cell_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_cell_bg)
        .fg(DEFAULT_THEME.comment);

    let right_spans = vec![
        Span::styled(" s ", key_style),
        Span::styled(" start ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" ⎵ ", key_style),
        Span::styled(" pause ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" n ", key_style),
        Span::styled(" step ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" x ", key_style),
        Span::styled(" stop ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled(" i ", key_style),
        Span::styled(" input ", desc_style),
        Span::styled("│", sep_style),
        Span::styled(" ", desc_style),
        Span::styled("q", key_style),
        Span::styled(" quit ", desc_style),
    ];

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_cell_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
