//! Virtual machine: engine, run-state machine, and observation
//!
//! This module is the core of the crate:
//! - [`engine`]: opcode dispatch in bounded slices ([`engine::Engine::run_cycle`])
//! - [`control`]: the Stopped/Running/Paused state machine and the
//!   [`control::Controller`] that drives an engine through it
//! - [`observer`]: the [`observer::EngineObserver`] callback interface and
//!   ready-made observers
//! - [`errors`]: dispatch faults and control-protocol errors
//!
//! # Execution Model
//!
//! Execution is cooperative and single-threaded. A scheduler repeatedly
//! invokes one bounded cycle at a time; between cycles the controller applies
//! pause/stop requests and terminal outcomes. No instruction is ever half
//! executed: an interrupted run always stops on an instruction boundary.

pub mod control;
pub mod engine;
pub mod errors;
pub mod observer;
