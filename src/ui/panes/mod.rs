//! TUI pane rendering modules
//!
//! This module provides the rendering logic for all visual panes in the TUI,
//! organized by responsibility.
//!
//! # Pane Modules
//!
//! - [`program`]: Instruction stream with the program counter highlighted
//! - [`tape`]: Hex dump of the tape with the data pointer highlighted
//! - [`output`]: Bytes the program has written so far
//! - [`input`]: Input byte cursor and the feed prompt
//! - [`status`]: Status bar with run-state, counters, and keybindings
//!
//! Each pane module exports a `render_*_pane()` function taking the frame,
//! its area, the data it shows, focus, and its scroll state. Panes are
//! stateless beyond the scroll state the caller owns.

pub mod input;
pub mod output;
pub mod program;
pub mod status;
pub mod tape;

// Re-export render functions for convenience
pub use input::render_input_pane;
pub use output::render_output_pane;
pub use program::{render_program_pane, ProgramScrollState};
pub use status::render_status_bar;
pub use tape::render_tape_pane;
