//! Memory model for the tape machine
//!
//! This module provides the byte storage the engine executes against:
//! - [`cells`]: the data tape, a growable zero-initialized byte array
//! - [`streams`]: the input cursor and the append-only output log
//!
//! # Growth Policy
//!
//! The tape is preloaded with a fixed number of zeroed cells (30000 by
//! default) and extends itself, never shrinks, when the data pointer moves
//! past the end. Cells beyond the preload are indistinguishable from
//! preloaded ones: both read as zero until written.

pub mod cells;
pub mod streams;
