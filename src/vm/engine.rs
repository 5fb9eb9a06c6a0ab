// Execution engine for the tape machine

use crate::loader::opcode::Opcode;
use crate::loader::program::Program;
use crate::tape::cells::Tape;
use crate::tape::streams::{InputStream, OutputLog};
use crate::vm::errors::Fault;
use crate::vm::observer::EngineSnapshot;

/// Outcome of one bounded execution slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The quantum was consumed with instructions still remaining
    Continuing,

    /// The program counter reached the end of the program
    ProgramComplete,

    /// A `,` found no remaining input. The engine stays on that instruction
    /// so the read retries once more input is fed
    InputExhausted,

    /// A dispatch fault; the run cannot continue
    Aborted(Fault),
}

/// The virtual machine core: program, tape, cursors, and byte streams.
///
/// The engine executes instructions in bounded slices via
/// [`Engine::run_cycle`] and knows nothing about scheduling or run-states;
/// those belong to the [`Controller`](crate::vm::control::Controller).
pub struct Engine {
    /// Loaded program with its jump table
    program: Program,

    /// Data tape
    tape: Tape,

    /// Input byte cursor
    input: InputStream,

    /// Output bytes produced so far
    output: OutputLog,

    /// Program counter
    pc: usize,

    /// Data pointer
    mem_ptr: usize,

    /// Instructions dispatched since the last reset
    executed: u64,
}

impl Engine {
    /// Create an engine over a loaded program.
    ///
    /// `tape_cells` is the preload size hint; the tape grows past it on
    /// demand.
    pub fn new(program: Program, input: Vec<u8>, tape_cells: usize) -> Engine {
        Engine {
            program,
            tape: Tape::new(tape_cells),
            input: InputStream::new(input),
            output: OutputLog::new(),
            pc: 0,
            mem_ptr: 0,
            executed: 0,
        }
    }

    /// Execute up to `max_instructions` opcodes starting at the current `pc`.
    ///
    /// The slice ends early when the program completes, a `,` exhausts the
    /// input, or a fault aborts the run. Jump targets land on the bracket
    /// itself; the unconditional `pc` increment after dispatch then advances
    /// past it.
    pub fn run_cycle(&mut self, max_instructions: usize) -> CycleOutcome {
        for _ in 0..max_instructions {
            let Some(op) = self.program.op(self.pc) else {
                break;
            };

            match op {
                Opcode::MoveRight => {
                    self.mem_ptr += 1;
                    self.tape.ensure(self.mem_ptr);
                }
                Opcode::MoveLeft => {
                    if self.mem_ptr == 0 {
                        return CycleOutcome::Aborted(Fault::PointerUnderflow { pc: self.pc });
                    }
                    self.mem_ptr -= 1;
                }
                Opcode::Increment => self.tape.increment(self.mem_ptr),
                Opcode::Decrement => self.tape.decrement(self.mem_ptr),
                Opcode::Output => self.output.push(self.tape.get(self.mem_ptr)),
                Opcode::Input => match self.input.next_byte() {
                    Some(byte) => self.tape.set(self.mem_ptr, byte),
                    // pc stays on the `,` so the read retries after a feed
                    None => return CycleOutcome::InputExhausted,
                },
                Opcode::LoopStart => {
                    if self.tape.get(self.mem_ptr) == 0 {
                        if let Err(fault) = self.take_jump() {
                            return CycleOutcome::Aborted(fault);
                        }
                    }
                }
                Opcode::LoopEnd => {
                    if self.tape.get(self.mem_ptr) != 0 {
                        if let Err(fault) = self.take_jump() {
                            return CycleOutcome::Aborted(fault);
                        }
                    }
                }
            }

            self.pc += 1;
            self.executed += 1;
        }

        if self.pc >= self.program.len() {
            CycleOutcome::ProgramComplete
        } else {
            CycleOutcome::Continuing
        }
    }

    /// Move `pc` to the bracket matching the one it is on.
    fn take_jump(&mut self) -> Result<(), Fault> {
        match self.program.jump_target(self.pc) {
            Some(target) => {
                self.pc = target;
                Ok(())
            }
            None => Err(Fault::MissingJumpTarget { pc: self.pc }),
        }
    }

    /// Return tape, cursors, output, and counters to their fresh-run state.
    ///
    /// The input cursor rewinds to the first byte; bytes fed mid-run are
    /// kept and replay in order.
    pub fn reset(&mut self) {
        self.tape.reset();
        self.input.rewind();
        self.output.clear();
        self.pc = 0;
        self.mem_ptr = 0;
        self.executed = 0;
    }

    /// Append input bytes so a blocked `,` can retry.
    pub fn feed_input(&mut self, bytes: &[u8]) {
        self.input.feed(bytes);
    }

    /// Borrow the current state for an observer callback or a render pass.
    pub fn snapshot(&self) -> EngineSnapshot<'_> {
        EngineSnapshot {
            pc: self.pc,
            mem_ptr: self.mem_ptr,
            in_ptr: self.input.consumed(),
            executed: self.executed,
            output: self.output.bytes(),
            tape: self.tape.cells(),
        }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    pub fn input(&self) -> &InputStream {
        &self.input
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn mem_ptr(&self) -> usize {
        self.mem_ptr
    }

    pub fn executed(&self) -> u64 {
        self.executed
    }
}
