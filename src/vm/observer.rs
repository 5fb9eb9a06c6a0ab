//! Observation interface for a driven engine
//!
//! The controller reports run progress through an [`EngineObserver`]: one
//! `on_start` when a fresh run begins, one `on_tick` after every cycle
//! (including the final one), and exactly one `on_finish` when the run ends.
//! Observers never influence execution; the engine has no knowledge of them.

use crate::vm::errors::Fault;
use std::time::{Duration, Instant};

/// Read-only view of engine state, borrowed for the duration of a callback.
#[derive(Debug, Clone, Copy)]
pub struct EngineSnapshot<'a> {
    /// Program counter
    pub pc: usize,

    /// Data pointer
    pub mem_ptr: usize,

    /// Index of the next unread input byte
    pub in_ptr: usize,

    /// Instructions dispatched since the run began
    pub executed: u64,

    /// Output bytes produced so far
    pub output: &'a [u8],

    /// All materialized tape cells
    pub tape: &'a [u8],
}

/// Why a run reached `Stopped`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The program counter reached the end of the program
    Complete,

    /// The controller issued `stop`
    Stopped,

    /// The run was stopped while blocked on exhausted input
    InputStarved,

    /// A dispatch fault terminated the run
    Fault(Fault),
}

/// Callbacks fired by the controller around engine cycles.
///
/// All methods default to no-ops so observers implement only what they need.
pub trait EngineObserver {
    /// A fresh run is leaving `Stopped`; engine state has just been reset.
    fn on_start(&mut self) {}

    /// A cycle finished. Fires for every cycle, the final one included.
    fn on_tick(&mut self, _snapshot: &EngineSnapshot<'_>) {}

    /// The run ended. Fires exactly once per run.
    fn on_finish(&mut self, _reason: &FinishReason) {}
}

/// Observer that ignores every event.
pub struct NullObserver;

impl EngineObserver for NullObserver {}

/// Observer that keeps run statistics for display: cycle count, wall-clock
/// time, and the reason the last run ended.
#[derive(Debug, Clone, Default)]
pub struct TickMonitor {
    /// Cycles completed in the current or last run
    pub cycles: u64,

    /// When the current or last run began
    pub started_at: Option<Instant>,

    /// Finish reason and total runtime of the last completed run
    pub finished: Option<(FinishReason, Duration)>,
}

impl TickMonitor {
    pub fn new() -> TickMonitor {
        TickMonitor::default()
    }

    /// Wall-clock time of the current run, frozen once the run finishes.
    pub fn elapsed(&self) -> Option<Duration> {
        if let Some((_, total)) = self.finished {
            return Some(total);
        }
        self.started_at.map(|at| at.elapsed())
    }
}

impl EngineObserver for TickMonitor {
    fn on_start(&mut self) {
        self.cycles = 0;
        self.started_at = Some(Instant::now());
        self.finished = None;
    }

    fn on_tick(&mut self, _snapshot: &EngineSnapshot<'_>) {
        self.cycles += 1;
    }

    fn on_finish(&mut self, reason: &FinishReason) {
        let total = self
            .started_at
            .map(|at| at.elapsed())
            .unwrap_or(Duration::ZERO);
        self.finished = Some((*reason, total));
    }
}
