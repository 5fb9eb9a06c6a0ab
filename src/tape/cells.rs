//! The data tape: growable, zero-initialized byte cells

/// Number of pre-zeroed cells a tape starts with unless a size hint is given.
pub const DEFAULT_TAPE_CELLS: usize = 30000;

/// The addressable memory a program manipulates, indexed from 0 upward.
///
/// Cell arithmetic wraps at the u8 boundary (255 + 1 = 0, 0 - 1 = 255).
/// The tape grows on demand when an index past the end is touched and is
/// never shrunk during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,

    /// Cell count restored by [`Tape::reset`], from the construction hint
    preload: usize,
}

impl Tape {
    /// Create a tape with `preload` pre-zeroed cells.
    ///
    /// A zero hint still materializes one cell so index 0 is always valid.
    pub fn new(preload: usize) -> Tape {
        let preload = preload.max(1);
        Tape {
            cells: vec![0; preload],
            preload,
        }
    }

    /// Read the cell at `index`. Unmaterialized cells read as zero.
    pub fn get(&self, index: usize) -> u8 {
        self.cells.get(index).copied().unwrap_or(0)
    }

    /// Write the cell at `index`, growing the tape if needed.
    pub fn set(&mut self, index: usize, value: u8) {
        self.ensure(index);
        self.cells[index] = value;
    }

    /// Increment the cell at `index`, wrapping 255 to 0.
    pub fn increment(&mut self, index: usize) {
        self.ensure(index);
        self.cells[index] = self.cells[index].wrapping_add(1);
    }

    /// Decrement the cell at `index`, wrapping 0 to 255.
    pub fn decrement(&mut self, index: usize) {
        self.ensure(index);
        self.cells[index] = self.cells[index].wrapping_sub(1);
    }

    /// Grow the tape with zeroed cells until `index` is materialized.
    pub fn ensure(&mut self, index: usize) {
        if index >= self.cells.len() {
            self.cells.resize(index + 1, 0);
        }
    }

    /// All materialized cells.
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Number of materialized cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Return the tape to its freshly constructed state: preload-sized and
    /// all zero.
    pub fn reset(&mut self) {
        self.cells.clear();
        self.cells.resize(self.preload, 0);
    }
}

impl Default for Tape {
    fn default() -> Tape {
        Tape::new(DEFAULT_TAPE_CELLS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_arithmetic() {
        let mut tape = Tape::new(4);
        tape.decrement(0);
        assert_eq!(tape.get(0), 255);
        tape.increment(0);
        assert_eq!(tape.get(0), 0);
    }

    #[test]
    fn test_grows_past_preload() {
        let mut tape = Tape::new(4);
        tape.set(10, 42);
        assert_eq!(tape.len(), 11);
        assert_eq!(tape.get(10), 42);
        // Cells in between were zero-filled
        assert_eq!(tape.get(7), 0);
    }

    #[test]
    fn test_reset_restores_preload() {
        let mut tape = Tape::new(4);
        tape.set(100, 9);
        tape.reset();
        assert_eq!(tape.len(), 4);
        assert!(tape.cells().iter().all(|&c| c == 0));
    }
}
