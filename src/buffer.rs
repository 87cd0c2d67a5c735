//! Read-only buffer - the text a window displays

use std::path::{Path, PathBuf};

use crate::coord::{BufferCoord, BufferRange};
use crate::error::Result;

/// Lines of text with associated metadata
#[derive(Debug, Clone)]
pub struct Buffer {
    /// Lines of text, without trailing newlines
    lines: Vec<String>,
    /// Buffer name (e.g., "main.rs", "*scratch*")
    name: String,
    /// Associated file path (None for unnamed buffers)
    filename: Option<PathBuf>,
}

impl Buffer {
    /// Create a buffer from a string
    pub fn from_text(name: impl Into<String>, content: &str) -> Self {
        let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
        // Always have at least one line
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self {
            lines,
            name: name.into(),
            filename: None,
        }
    }

    /// Create a buffer from file contents
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unnamed".to_string());

        let mut buffer = Self::from_text(name, &content);
        buffer.filename = Some(path.to_path_buf());
        Ok(buffer)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Get a line by index
    pub fn line(&self, idx: usize) -> Option<&str> {
        self.lines.get(idx).map(String::as_str)
    }

    /// Text between two coordinates on the same line
    ///
    /// Columns are clamped to the line and adjusted to char boundaries.
    pub fn slice(&self, begin: BufferCoord, end: BufferCoord) -> &str {
        debug_assert_eq!(begin.line, end.line);
        match self.line(begin.line) {
            Some(text) => {
                let start = floor_char_boundary(text, begin.column);
                let end = floor_char_boundary(text, end.column);
                if start >= end {
                    ""
                } else {
                    &text[start..end]
                }
            }
            None => "",
        }
    }

    /// Coordinate one past the last byte of the buffer
    pub fn end_coord(&self) -> BufferCoord {
        let last = self.lines.len() - 1;
        BufferCoord::new(last, self.lines[last].len())
    }

    /// Range covering lines `first..first + count`, clamped to the buffer
    pub fn line_range(&self, first: usize, count: usize) -> BufferRange {
        let first = first.min(self.lines.len());
        let last = (first + count).min(self.lines.len());
        let end = if last >= self.lines.len() {
            self.end_coord()
        } else {
            BufferCoord::new(last, 0)
        };
        BufferRange::new(BufferCoord::new(first, 0), end.max(BufferCoord::new(first, 0)))
    }
}

/// Find the nearest valid UTF-8 char boundary at or before `pos`
pub fn floor_char_boundary(s: &str, pos: usize) -> usize {
    if pos >= s.len() {
        return s.len();
    }
    let mut p = pos;
    while p > 0 && !s.is_char_boundary(p) {
        p -= 1;
    }
    p
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text() {
        let buffer = Buffer::from_text("test", "one\ntwo\nthree");
        assert_eq!(buffer.name(), "test");
        assert_eq!(buffer.line_count(), 3);
        assert_eq!(buffer.line(1), Some("two"));
        assert_eq!(buffer.line(3), None);
        assert!(buffer.filename().is_none());
    }

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buffer = Buffer::from_text("empty", "");
        assert_eq!(buffer.line_count(), 1);
        assert_eq!(buffer.line(0), Some(""));
        assert_eq!(buffer.end_coord(), BufferCoord::new(0, 0));
    }

    #[test]
    fn test_slice_respects_char_boundaries() {
        let buffer = Buffer::from_text("utf8", "café au lait");
        // 'é' occupies bytes 3..5
        assert_eq!(buffer.slice(BufferCoord::new(0, 0), BufferCoord::new(0, 4)), "caf");
        assert_eq!(buffer.slice(BufferCoord::new(0, 6), BufferCoord::new(0, 100)), "au lait");
    }

    #[test]
    fn test_line_range() {
        let buffer = Buffer::from_text("test", "a\nbb\nccc");
        let range = buffer.line_range(1, 1);
        assert_eq!(range.begin, BufferCoord::new(1, 0));
        assert_eq!(range.end, BufferCoord::new(2, 0));

        let tail = buffer.line_range(1, 10);
        assert_eq!(tail.end, BufferCoord::new(2, 3));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.txt");
        std::fs::write(&path, "hello\nworld\n").unwrap();

        let buffer = Buffer::from_file(&path).unwrap();
        assert_eq!(buffer.name(), "hello.txt");
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.filename(), Some(path.as_path()));
    }
}
