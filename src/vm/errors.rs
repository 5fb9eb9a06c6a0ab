//! Fault and control-error types for the virtual machine
//!
//! Two distinct failure families live here:
//! - [`Fault`]: dispatch-level faults that terminate a run. These surface as
//!   `CycleOutcome::Aborted`, not as `Err`, because a fault is an outcome of
//!   execution rather than a misuse of the engine.
//! - [`ControlError`]: violations of the run-state protocol by the caller.
//!   These fail loudly so the controller's model of the machine never drifts
//!   from the machine itself.

use crate::vm::control::{Command, RunState};
use std::fmt;

/// Dispatch-level faults that force a run to terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// A `<` executed with the data pointer already at address 0
    PointerUnderflow { pc: usize },

    /// A bracket reached dispatch without a jump-table entry
    MissingJumpTarget { pc: usize },
}

impl Fault {
    /// Program counter of the faulting instruction.
    pub fn pc(&self) -> usize {
        match self {
            Fault::PointerUnderflow { pc } => *pc,
            Fault::MissingJumpTarget { pc } => *pc,
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Fault::PointerUnderflow { pc } => {
                write!(
                    f,
                    "pointer underflow at instruction {}: '<' at tape address 0",
                    pc
                )
            }
            Fault::MissingJumpTarget { pc } => {
                write!(f, "no jump target recorded for bracket at instruction {}", pc)
            }
        }
    }
}

impl std::error::Error for Fault {}

/// Violations of the run-state protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlError {
    /// A control command that is not legal in the current run-state
    InvalidTransition { state: RunState, command: Command },

    /// `start` called with a quantum of zero, which could never make progress
    ZeroQuantum,
}

impl fmt::Display for ControlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlError::InvalidTransition { state, command } => {
                write!(f, "cannot {} while {}", command, state)
            }
            ControlError::ZeroQuantum => {
                write!(f, "quantum must be at least 1 instruction per cycle")
            }
        }
    }
}

impl std::error::Error for ControlError {}
