//! Input cursor and output log
//!
//! All program I/O is in-memory byte sequences owned by the engine. The
//! input is a cursor over bytes supplied at construction (and extended later
//! through [`InputStream::feed`] when a run exhausts it); the output is an
//! append-only log the controller reads back after every cycle.

/// Cursor over the program's input bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputStream {
    bytes: Vec<u8>,
    pos: usize,
}

impl InputStream {
    pub fn new(bytes: Vec<u8>) -> InputStream {
        InputStream { bytes, pos: 0 }
    }

    /// The next input byte, advancing the cursor. `None` when exhausted.
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    /// Append more bytes past the current end.
    ///
    /// Used after an exhausted read so the blocked instruction can retry.
    pub fn feed(&mut self, more: &[u8]) {
        self.bytes.extend_from_slice(more);
    }

    /// Index of the next unread byte.
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// The full input sequence, consumed and pending alike.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Move the cursor back to the first byte. Fed bytes are kept and will
    /// replay in order on the next run.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }
}

/// Append-only log of bytes produced by output instructions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputLog {
    bytes: Vec<u8>,
}

impl OutputLog {
    pub fn new() -> OutputLog {
        OutputLog { bytes: Vec::new() }
    }

    pub fn push(&mut self, byte: u8) {
        self.bytes.push(byte);
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// The output decoded as text, with invalid UTF-8 replaced.
    pub fn to_text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_cursor_and_feed() {
        let mut input = InputStream::new(b"ab".to_vec());
        assert_eq!(input.next_byte(), Some(b'a'));
        assert_eq!(input.next_byte(), Some(b'b'));
        assert_eq!(input.next_byte(), None);

        input.feed(b"c");
        assert_eq!(input.next_byte(), Some(b'c'));
        assert_eq!(input.consumed(), 3);
    }

    #[test]
    fn test_rewind_replays_fed_bytes() {
        let mut input = InputStream::new(b"x".to_vec());
        input.next_byte();
        input.feed(b"y");
        input.rewind();
        assert_eq!(input.next_byte(), Some(b'x'));
        assert_eq!(input.next_byte(), Some(b'y'));
    }
}
