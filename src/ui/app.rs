//! Main TUI application state and logic

use crate::ui::panes::ProgramScrollState;
use crate::vm::control::Controller;
use crate::vm::engine::CycleOutcome;
use crate::vm::observer::TickMonitor;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Program,
    Tape,
    Output,
    Input,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: program -> tape -> input -> output)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Tape,
            FocusedPane::Tape => FocusedPane::Input,
            FocusedPane::Input => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Program,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Program => FocusedPane::Output,
            FocusedPane::Tape => FocusedPane::Program,
            FocusedPane::Input => FocusedPane::Tape,
            FocusedPane::Output => FocusedPane::Input,
        }
    }
}

/// The main application state
pub struct App {
    /// The controller driving the machine
    pub controller: Controller,

    /// Run statistics shown in the status bar
    pub monitor: TickMonitor,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll state
    pub program_scroll: ProgramScrollState,
    pub tape_scroll: usize,
    pub output_scroll: usize,
    pub input_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Instructions per cycle, adjustable at runtime
    pub quantum: usize,

    /// Whether the input feed prompt is active
    pub input_mode: bool,

    /// Bytes typed into the feed prompt but not yet committed
    pub pending_input: String,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app around a controller
    pub fn new(controller: Controller, quantum: usize) -> Self {
        App {
            controller,
            monitor: TickMonitor::new(),
            focused_pane: FocusedPane::Program,
            program_scroll: ProgramScrollState::new(),
            tape_scroll: 0,
            output_scroll: 0,
            input_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready! Press s to start"),
            quantum,
            input_mode: false,
            pending_input: String::new(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // One cycle per loop iteration while the machine is running
            if let Some(outcome) = self.controller.run_tick(&mut self.monitor) {
                self.note_outcome(outcome);
            }

            // Poll without waiting while running so cycles keep flowing
            let wait = if self.controller.state().is_running() {
                Duration::from_millis(0)
            } else {
                Duration::from_millis(50)
            };
            if event::poll(wait)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Create layout: 4 panes in 2 columns, plus status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Program (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(columns[0]);

        // Right column: Tape (top) | Input (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
            .split(columns[1]);

        let snapshot = self.controller.engine().snapshot();

        // Render each pane
        super::panes::render_program_pane(
            frame,
            left_rows[0],
            self.controller.engine().program(),
            snapshot.pc,
            self.focused_pane == FocusedPane::Program,
            &mut self.program_scroll,
        );

        super::panes::render_output_pane(
            frame,
            left_rows[1],
            snapshot.output,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_tape_pane(
            frame,
            right_rows[0],
            snapshot.tape,
            snapshot.mem_ptr,
            self.focused_pane == FocusedPane::Tape,
            &mut self.tape_scroll,
        );

        super::panes::render_input_pane(
            frame,
            right_rows[1],
            self.controller.engine().input(),
            &self.pending_input,
            self.input_mode,
            self.focused_pane == FocusedPane::Input,
            &mut self.input_scroll,
        );

        let faulted = matches!(
            self.controller.last_outcome(),
            Some(CycleOutcome::Aborted(_))
        );

        // Render status bar
        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.controller.state(),
            snapshot.executed,
            self.monitor.cycles,
            self.monitor.elapsed(),
            self.controller.quantum(),
            self.input_mode,
            faulted,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        if self.input_mode {
            self.handle_feed_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('s') => {
                self.start();
            }
            KeyCode::Char(' ') => {
                // Toggle run/pause (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    if self.controller.state().is_running() {
                        self.pause();
                    } else {
                        self.start();
                    }
                }
            }
            KeyCode::Char('n') => {
                self.step();
            }
            KeyCode::Char('x') => {
                self.stop();
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.quantum = self.quantum.saturating_mul(2).min(1 << 20);
                self.controller.set_quantum(self.quantum);
                self.status_message = format!("Quantum: {} instructions per cycle", self.quantum);
            }
            KeyCode::Char('-') => {
                self.quantum = (self.quantum / 2).max(1);
                self.controller.set_quantum(self.quantum);
                self.status_message = format!("Quantum: {} instructions per cycle", self.quantum);
            }
            KeyCode::Char('i') => {
                self.input_mode = true;
                self.status_message = "Type input bytes, Enter to feed".to_string();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::Up => {
                match self.focused_pane {
                    FocusedPane::Program => {
                        // Scrolling up makes the current instruction move down visually
                        if let Some(row) = self.program_scroll.target_row {
                            self.program_scroll.target_row = Some(row.saturating_add(1));
                        }
                    }
                    FocusedPane::Tape => {
                        if self.tape_scroll > 0 {
                            self.tape_scroll = self.tape_scroll.saturating_sub(1);
                        }
                    }
                    FocusedPane::Output => {
                        if self.output_scroll > 0 {
                            self.output_scroll = self.output_scroll.saturating_sub(1);
                        }
                    }
                    FocusedPane::Input => {
                        if self.input_scroll > 0 {
                            self.input_scroll = self.input_scroll.saturating_sub(1);
                        }
                    }
                }
            }
            KeyCode::Down => {
                match self.focused_pane {
                    FocusedPane::Program => {
                        // Scrolling down makes the current instruction move up visually
                        if let Some(row) = self.program_scroll.target_row {
                            self.program_scroll.target_row = Some(row.saturating_sub(1));
                        }
                    }
                    FocusedPane::Tape => {
                        self.tape_scroll = self.tape_scroll.saturating_add(1);
                    }
                    FocusedPane::Output => {
                        self.output_scroll = self.output_scroll.saturating_add(1);
                    }
                    FocusedPane::Input => {
                        self.input_scroll = self.input_scroll.saturating_add(1);
                    }
                }
            }
            KeyCode::PageUp => {
                match self.focused_pane {
                    FocusedPane::Program => {
                        if let Some(row) = self.program_scroll.target_row {
                            self.program_scroll.target_row = Some(row.saturating_add(10));
                        }
                    }
                    FocusedPane::Tape => {
                        self.tape_scroll = self.tape_scroll.saturating_sub(10);
                    }
                    FocusedPane::Output => {
                        self.output_scroll = self.output_scroll.saturating_sub(10);
                    }
                    FocusedPane::Input => {
                        self.input_scroll = self.input_scroll.saturating_sub(10);
                    }
                }
            }
            KeyCode::PageDown => {
                match self.focused_pane {
                    FocusedPane::Program => {
                        if let Some(row) = self.program_scroll.target_row {
                            self.program_scroll.target_row = Some(row.saturating_sub(10));
                        }
                    }
                    FocusedPane::Tape => {
                        self.tape_scroll = self.tape_scroll.saturating_add(10);
                    }
                    FocusedPane::Output => {
                        self.output_scroll = self.output_scroll.saturating_add(10);
                    }
                    FocusedPane::Input => {
                        self.input_scroll = self.input_scroll.saturating_add(10);
                    }
                }
            }
            _ => {}
        }
    }

    /// Handle keys while the input feed prompt is active
    fn handle_feed_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let count = self.pending_input.len();
                self.controller.feed_input(self.pending_input.as_bytes());
                self.pending_input.clear();
                self.input_mode = false;
                self.status_message = format!("Fed {} byte(s); press s to resume", count);
            }
            KeyCode::Esc => {
                self.pending_input.clear();
                self.input_mode = false;
                self.status_message = "Input cancelled".to_string();
            }
            KeyCode::Backspace => {
                self.pending_input.pop();
            }
            KeyCode::Char(c) => {
                self.pending_input.push(c);
            }
            _ => {}
        }
    }

    /// Begin a fresh run or resume a paused one
    fn start(&mut self) {
        match self.controller.start(self.quantum, &mut self.monitor) {
            Ok(()) => self.status_message = "Running...".to_string(),
            Err(e) => self.status_message = format!("{}", e),
        }
    }

    /// Pause at the next cycle boundary
    fn pause(&mut self) {
        match self.controller.pause() {
            Ok(()) => self.status_message = "Paused".to_string(),
            Err(e) => self.status_message = format!("{}", e),
        }
    }

    /// Execute a single instruction
    fn step(&mut self) {
        match self.controller.step(&mut self.monitor) {
            Ok(outcome) => {
                self.status_message = "Stepped".to_string();
                self.note_outcome(outcome);
            }
            Err(e) => self.status_message = format!("{}", e),
        }
    }

    /// End the current run
    fn stop(&mut self) {
        match self.controller.stop(&mut self.monitor) {
            Ok(()) => self.status_message = "Stopped".to_string(),
            Err(e) => self.status_message = format!("{}", e),
        }
    }

    /// Update status and scrolling after an executed cycle
    fn note_outcome(&mut self, outcome: CycleOutcome) {
        match outcome {
            CycleOutcome::Continuing => {
                // Keep the output pinned to its latest line
                self.output_scroll = usize::MAX;
            }
            CycleOutcome::ProgramComplete => {
                self.status_message = "Program complete".to_string();
                self.output_scroll = usize::MAX;
            }
            CycleOutcome::InputExhausted => {
                self.status_message = "Input exhausted: press i to feed more".to_string();
            }
            CycleOutcome::Aborted(fault) => {
                self.status_message = format!("Aborted: {}", fault);
            }
        }
    }
}
