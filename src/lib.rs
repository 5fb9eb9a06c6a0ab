//! # Introduction
//!
//! braintty loads and executes Brainfuck programs on a resumable virtual
//! machine that yields control after a bounded slice of work.  Execution is
//! driven and observed through a terminal UI built with
//! [ratatui](https://docs.rs/ratatui), or headlessly from the command line.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Loader → Program + JumpTable → Engine → Controller → TUI
//! ```
//!
//! 1. [`loader`] — filters the source down to the instruction alphabet and
//!    precomputes the [`loader::program::JumpTable`] for the bracket pairs.
//! 2. [`tape`] — the machine's data plane: the growable byte
//!    [`tape::cells::Tape`] plus the [`tape::streams::InputStream`] and
//!    [`tape::streams::OutputLog`] byte streams.
//! 3. [`vm`] — the [`vm::engine::Engine`] executes bounded cycles and the
//!    [`vm::control::Controller`] layers the stopped/running/paused run-state
//!    machine and observer callbacks on top.
//! 4. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! ## Instruction set
//!
//! The eight canonical operations: `>` `<` move the data pointer, `+` `-`
//! adjust the current cell with wrapping arithmetic, `.` `,` write and read
//! bytes, `[` `]` loop while the current cell is nonzero.  Every other
//! character in the source is a comment.

pub mod loader;
pub mod tape;
pub mod ui;
pub mod vm;
