//! Buffer and display coordinates

/// A position in a buffer: line index and byte offset within that line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferCoord {
    pub line: usize,
    pub column: usize,
}

impl BufferCoord {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A half-open range of buffer positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BufferRange {
    pub begin: BufferCoord,
    pub end: BufferCoord,
}

impl BufferRange {
    pub fn new(begin: BufferCoord, end: BufferCoord) -> Self {
        Self { begin, end }
    }

    /// Check if a position lies inside the range
    pub fn contains(&self, coord: BufferCoord) -> bool {
        coord >= self.begin && coord < self.end
    }

    pub fn is_empty(&self) -> bool {
        self.begin >= self.end
    }
}

/// A position on screen: row and display column (in terminal cells)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DisplayCoord {
    pub line: usize,
    pub column: usize,
}

impl DisplayCoord {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}
