//! Run-state machine and the cooperative controller
//!
//! The machine is always in exactly one of three [`RunState`]s and moves
//! between them only through [`transition`], a single exhaustive function
//! over `(state, command)` pairs. Illegal pairs are rejected with
//! [`ControlError::InvalidTransition`] and change nothing, so a caller that
//! tracks the state it last observed can never be silently wrong.
//!
//! # Scheduling
//!
//! The [`Controller`] owns no loop of its own. Whoever drives it (the TUI
//! event loop, or a plain `loop` in headless mode) calls
//! [`Controller::run_tick`] repeatedly; each call executes at most one cycle
//! of `quantum` instructions and only while the state is `Running`. Pause
//! and stop therefore take effect at cycle boundaries, never inside one.

use crate::vm::engine::{CycleOutcome, Engine};
use crate::vm::errors::ControlError;
use crate::vm::observer::{EngineObserver, FinishReason};
use std::fmt;

/// Instructions per cycle when the caller does not choose a quantum.
pub const DEFAULT_QUANTUM: usize = 4096;

/// Externally visible run-state of the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
}

impl RunState {
    pub fn is_stopped(self) -> bool {
        self == RunState::Stopped
    }

    pub fn is_running(self) -> bool {
        self == RunState::Running
    }

    pub fn is_paused(self) -> bool {
        self == RunState::Paused
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunState::Stopped => write!(f, "stopped"),
            RunState::Running => write!(f, "running"),
            RunState::Paused => write!(f, "paused"),
        }
    }
}

/// Control commands accepted by the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Step,
    Stop,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Pause => write!(f, "pause"),
            Command::Step => write!(f, "step"),
            Command::Stop => write!(f, "stop"),
        }
    }
}

/// The legal transition relation of the run-state machine.
///
/// | from    | start   | pause  | step   | stop    |
/// |---------|---------|--------|--------|---------|
/// | Stopped | Running |        | Paused |         |
/// | Running |         | Paused |        | Stopped |
/// | Paused  | Running |        | Paused | Stopped |
///
/// Empty cells fail with [`ControlError::InvalidTransition`].
pub fn transition(state: RunState, command: Command) -> Result<RunState, ControlError> {
    match (state, command) {
        (RunState::Stopped, Command::Start) => Ok(RunState::Running),
        (RunState::Stopped, Command::Step) => Ok(RunState::Paused),
        (RunState::Running, Command::Pause) => Ok(RunState::Paused),
        (RunState::Running, Command::Stop) => Ok(RunState::Stopped),
        (RunState::Paused, Command::Start) => Ok(RunState::Running),
        (RunState::Paused, Command::Step) => Ok(RunState::Paused),
        (RunState::Paused, Command::Stop) => Ok(RunState::Stopped),
        (state, command) => Err(ControlError::InvalidTransition { state, command }),
    }
}

/// Drives an [`Engine`] through the run-state machine.
///
/// Leaving `Stopped` (by `start` or `step`) begins a fresh run: the engine
/// resets and the observer's `on_start` fires. Resuming from `Paused` resets
/// nothing. Reaching `ProgramComplete` or a fault forces `Stopped` and fires
/// `on_finish`; exhausting the input drops the machine to `Paused` so the
/// caller can feed more bytes and resume.
pub struct Controller {
    /// The engine being driven
    engine: Engine,

    /// Current run-state
    state: RunState,

    /// Instructions per cycle while running
    quantum: usize,

    /// Outcome of the most recent cycle of the current run
    last_outcome: Option<CycleOutcome>,
}

impl Controller {
    pub fn new(engine: Engine) -> Controller {
        Controller {
            engine,
            state: RunState::Stopped,
            quantum: DEFAULT_QUANTUM,
            last_outcome: None,
        }
    }

    /// Begin a fresh run, or resume a paused one, with `quantum` instructions
    /// per cycle.
    pub fn start(
        &mut self,
        quantum: usize,
        observer: &mut dyn EngineObserver,
    ) -> Result<(), ControlError> {
        if quantum == 0 {
            return Err(ControlError::ZeroQuantum);
        }
        let from = self.state;
        self.state = transition(from, Command::Start)?;
        self.quantum = quantum;
        if from.is_stopped() {
            self.begin_run(observer);
        }
        Ok(())
    }

    /// Pause at the current cycle boundary. Engine state is retained.
    pub fn pause(&mut self) -> Result<(), ControlError> {
        self.state = transition(self.state, Command::Pause)?;
        Ok(())
    }

    /// Execute exactly one instruction.
    ///
    /// From `Stopped` this begins a fresh run; from `Paused` it continues
    /// the current one.
    pub fn step(
        &mut self,
        observer: &mut dyn EngineObserver,
    ) -> Result<CycleOutcome, ControlError> {
        let from = self.state;
        self.state = transition(from, Command::Step)?;
        if from.is_stopped() {
            self.begin_run(observer);
        }
        Ok(self.cycle(1, observer))
    }

    /// End the run and report why it finished.
    ///
    /// Tape and cursors are retained for inspection; only the next fresh
    /// `start` or `step` resets them.
    pub fn stop(&mut self, observer: &mut dyn EngineObserver) -> Result<(), ControlError> {
        self.state = transition(self.state, Command::Stop)?;
        let reason = match self.last_outcome {
            Some(CycleOutcome::InputExhausted) => FinishReason::InputStarved,
            _ => FinishReason::Stopped,
        };
        observer.on_finish(&reason);
        Ok(())
    }

    /// One scheduler tick: execute one cycle if the machine is `Running`.
    ///
    /// Returns the cycle's outcome, or `None` when no cycle ran.
    pub fn run_tick(&mut self, observer: &mut dyn EngineObserver) -> Option<CycleOutcome> {
        if !self.state.is_running() {
            return None;
        }
        Some(self.cycle(self.quantum, observer))
    }

    /// Drive a run until it ends, without yielding between cycles.
    ///
    /// Begins a fresh run from `Stopped` or resumes from `Paused`, then
    /// cycles until the outcome is anything other than `Continuing`.
    pub fn run_to_completion(
        &mut self,
        quantum: usize,
        observer: &mut dyn EngineObserver,
    ) -> Result<CycleOutcome, ControlError> {
        self.start(quantum, observer)?;
        loop {
            let outcome = self.cycle(self.quantum, observer);
            if outcome != CycleOutcome::Continuing {
                return Ok(outcome);
            }
        }
    }

    /// Append input bytes so a run blocked on `,` can resume.
    pub fn feed_input(&mut self, bytes: &[u8]) {
        self.engine.feed_input(bytes);
    }

    /// Change the instructions-per-cycle budget of the current and future
    /// runs. A zero quantum is ignored.
    pub fn set_quantum(&mut self, quantum: usize) {
        if quantum > 0 {
            self.quantum = quantum;
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn quantum(&self) -> usize {
        self.quantum
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn last_outcome(&self) -> Option<CycleOutcome> {
        self.last_outcome
    }

    /// Reset the engine and announce the fresh run.
    fn begin_run(&mut self, observer: &mut dyn EngineObserver) {
        self.engine.reset();
        self.last_outcome = None;
        observer.on_start();
    }

    /// Execute one cycle and apply its outcome to the run-state.
    ///
    /// The tick always fires before any finish notification, so observers
    /// see the final engine state before learning the run is over.
    fn cycle(&mut self, quantum: usize, observer: &mut dyn EngineObserver) -> CycleOutcome {
        let outcome = self.engine.run_cycle(quantum);
        self.last_outcome = Some(outcome);
        observer.on_tick(&self.engine.snapshot());

        match outcome {
            CycleOutcome::Continuing => {}
            CycleOutcome::ProgramComplete => {
                self.state = RunState::Stopped;
                observer.on_finish(&FinishReason::Complete);
            }
            CycleOutcome::InputExhausted => {
                // Recoverable: hold in Paused awaiting a feed or a stop
                self.state = RunState::Paused;
            }
            CycleOutcome::Aborted(fault) => {
                self.state = RunState::Stopped;
                observer.on_finish(&FinishReason::Fault(fault));
            }
        }

        outcome
    }
}
