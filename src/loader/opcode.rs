//! The eight-symbol instruction alphabet

use std::fmt;

/// A single tape-machine instruction.
///
/// Each variant corresponds to exactly one source character; every other
/// character in a source file is treated as a comment and dropped at load
/// time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Pointer movement
    MoveRight, // >
    MoveLeft,  // <

    // Cell arithmetic (wrapping at the u8 boundary)
    Increment, // +
    Decrement, // -

    // Byte I/O
    Output, // .
    Input,  // ,

    // Structured looping
    LoopStart, // [
    LoopEnd,   // ]
}

impl Opcode {
    /// Decode a source character. Returns `None` for comment characters.
    pub fn from_char(c: char) -> Option<Opcode> {
        match c {
            '>' => Some(Opcode::MoveRight),
            '<' => Some(Opcode::MoveLeft),
            '+' => Some(Opcode::Increment),
            '-' => Some(Opcode::Decrement),
            '.' => Some(Opcode::Output),
            ',' => Some(Opcode::Input),
            '[' => Some(Opcode::LoopStart),
            ']' => Some(Opcode::LoopEnd),
            _ => None,
        }
    }

    /// The source character this opcode was decoded from.
    pub fn to_char(self) -> char {
        match self {
            Opcode::MoveRight => '>',
            Opcode::MoveLeft => '<',
            Opcode::Increment => '+',
            Opcode::Decrement => '-',
            Opcode::Output => '.',
            Opcode::Input => ',',
            Opcode::LoopStart => '[',
            Opcode::LoopEnd => ']',
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alphabet_round_trip() {
        for c in ['>', '<', '+', '-', '.', ',', '[', ']'] {
            let op = Opcode::from_char(c).unwrap();
            assert_eq!(op.to_char(), c);
        }
    }

    #[test]
    fn test_comment_characters() {
        for c in ['a', 'Z', '0', ' ', '\n', '#', '{', '('] {
            assert_eq!(Opcode::from_char(c), None);
        }
    }
}
