//! Source filtering, bracket matching, and the loaded program
//!
//! A [`Program`] is built in two phases: [`filter_source`] discards every
//! comment character, then [`build_jumps`] resolves the bracket pairs into a
//! bidirectional [`JumpTable`]. Both phases run once at load time; the result
//! is immutable for the lifetime of the program.

use crate::loader::opcode::Opcode;
use rustc_hash::FxHashMap;
use std::fmt;

/// Bidirectional bracket mapping: each `[` index maps to its matching `]`
/// index and vice versa.
pub type JumpTable = FxHashMap<usize, usize>;

/// Errors that can reject a program at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// A bracket without a partner at the same nesting depth.
    ///
    /// `position` is the index of the offending bracket in the filtered
    /// instruction sequence, `bracket` the bracket kind that has no match.
    UnbalancedBrackets { position: usize, bracket: Opcode },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::UnbalancedBrackets { position, bracket } => match bracket {
                Opcode::LoopEnd => write!(
                    f,
                    "unbalanced ']' at instruction {}: no '[' is open",
                    position
                ),
                _ => write!(
                    f,
                    "unbalanced '[' at instruction {}: missing closing ']'",
                    position
                ),
            },
        }
    }
}

impl std::error::Error for LoadError {}

/// Filter raw source text down to the instruction alphabet, preserving order.
///
/// This never fails: characters outside the alphabet are comments, not errors.
pub fn filter_source(source: &str) -> Vec<Opcode> {
    source.chars().filter_map(Opcode::from_char).collect()
}

/// Resolve bracket pairs with a single left-to-right scan.
///
/// An index stack records open `[` positions; each `]` pops the most recent
/// one and the pair is recorded in both directions. A `]` with an empty stack
/// or a leftover `[` after the scan is an [`LoadError::UnbalancedBrackets`].
pub fn build_jumps(ops: &[Opcode]) -> Result<JumpTable, LoadError> {
    let mut jumps = JumpTable::default();
    let mut open_brackets: Vec<usize> = Vec::new();

    for (i, op) in ops.iter().enumerate() {
        match op {
            Opcode::LoopStart => open_brackets.push(i),
            Opcode::LoopEnd => {
                let start = open_brackets.pop().ok_or(LoadError::UnbalancedBrackets {
                    position: i,
                    bracket: Opcode::LoopEnd,
                })?;
                jumps.insert(start, i);
                jumps.insert(i, start);
            }
            _ => {}
        }
    }

    if let Some(start) = open_brackets.pop() {
        return Err(LoadError::UnbalancedBrackets {
            position: start,
            bracket: Opcode::LoopStart,
        });
    }

    Ok(jumps)
}

/// An executable program: the filtered instruction sequence plus its jump
/// table. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    ops: Vec<Opcode>,
    jumps: JumpTable,
}

impl Program {
    /// Load a program from raw source text.
    ///
    /// Comment characters are dropped silently; the only failure mode is an
    /// unbalanced bracket.
    pub fn load(source: &str) -> Result<Program, LoadError> {
        let ops = filter_source(source);
        let jumps = build_jumps(&ops)?;
        Ok(Program { ops, jumps })
    }

    /// The filtered instruction sequence.
    pub fn ops(&self) -> &[Opcode] {
        &self.ops
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// The instruction at `pc`, or `None` past the end of the program.
    pub fn op(&self, pc: usize) -> Option<Opcode> {
        self.ops.get(pc).copied()
    }

    /// The matching-bracket index for the bracket at `pc`.
    pub fn jump_target(&self, pc: usize) -> Option<usize> {
        self.jumps.get(&pc).copied()
    }

    /// The program text as it will execute, one character per instruction.
    pub fn to_text(&self) -> String {
        self.ops.iter().map(|op| op.to_char()).collect()
    }
}
