//! Display buffer - the per-frame visual representation of a window
//!
//! A display buffer is a list of display lines, each made of atoms. An atom
//! either refers to a span of buffer text (always within one buffer line) or
//! carries replacement text such as a line number. Highlighters mutate the
//! display buffer; the terminal front end paints it.

use unicode_width::UnicodeWidthChar;

use crate::buffer::Buffer;
use crate::coord::{BufferCoord, BufferRange};
use crate::style::Style;

/// Display width of a character, counting control characters as one cell
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(1)
}

/// Display width of a string
pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Byte offset of the longest prefix of `s` that fits in `max_width` columns
fn byte_offset_at_width(s: &str, max_width: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in s.char_indices() {
        let ch_width = char_width(ch);
        if width + ch_width > max_width {
            return idx;
        }
        width += ch_width;
    }
    s.len()
}

/// What an atom displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomContent {
    /// Buffer text between two coordinates on the same line
    Range { begin: BufferCoord, end: BufferCoord },
    /// Text that is not part of the buffer
    Text(String),
}

/// A styled piece of a display line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayAtom {
    content: AtomContent,
    pub style: Style,
}

impl DisplayAtom {
    /// Atom showing buffer text
    pub fn from_range(begin: BufferCoord, end: BufferCoord) -> Self {
        debug_assert_eq!(begin.line, end.line);
        Self {
            content: AtomContent::Range { begin, end },
            style: Style::default(),
        }
    }

    /// Atom showing replacement text
    pub fn text(text: impl Into<String>, style: Style) -> Self {
        Self {
            content: AtomContent::Text(text.into()),
            style,
        }
    }

    pub fn content(&self) -> &AtomContent {
        &self.content
    }

    pub fn has_buffer_range(&self) -> bool {
        matches!(self.content, AtomContent::Range { .. })
    }

    pub fn begin(&self) -> Option<BufferCoord> {
        match self.content {
            AtomContent::Range { begin, .. } => Some(begin),
            AtomContent::Text(_) => None,
        }
    }

    pub fn end(&self) -> Option<BufferCoord> {
        match self.content {
            AtomContent::Range { end, .. } => Some(end),
            AtomContent::Text(_) => None,
        }
    }

    /// The text this atom displays
    pub fn text_in<'a>(&'a self, buffer: &'a Buffer) -> &'a str {
        match &self.content {
            AtomContent::Range { begin, end } => buffer.slice(*begin, *end),
            AtomContent::Text(text) => text,
        }
    }

    pub fn width(&self, buffer: &Buffer) -> usize {
        str_width(self.text_in(buffer))
    }

    /// Split a buffer atom at `coord`, keeping the head and returning the tail
    fn split_at(&mut self, coord: BufferCoord) -> DisplayAtom {
        match &mut self.content {
            AtomContent::Range { begin, end } => {
                debug_assert!(*begin < coord && coord < *end);
                let tail = DisplayAtom {
                    content: AtomContent::Range { begin: coord, end: *end },
                    style: self.style,
                };
                *end = coord;
                tail
            }
            AtomContent::Text(_) => unreachable!("split_at called on a text atom"),
        }
    }

    /// Split so that the head is at most `width` columns wide
    ///
    /// Returns the tail, or None if the whole atom fits.
    fn split_at_width(&mut self, buffer: &Buffer, width: usize) -> Option<DisplayAtom> {
        let offset = byte_offset_at_width(self.text_in(buffer), width);
        match &mut self.content {
            AtomContent::Range { begin, end } => {
                let split = BufferCoord::new(begin.line, begin.column + offset);
                if split >= *end {
                    return None;
                }
                let tail = DisplayAtom {
                    content: AtomContent::Range { begin: split, end: *end },
                    style: self.style,
                };
                *end = split;
                Some(tail)
            }
            AtomContent::Text(text) => {
                if offset >= text.len() {
                    return None;
                }
                let rest = text.split_off(offset);
                Some(DisplayAtom::text(rest, self.style))
            }
        }
    }
}

/// One row of the display buffer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayLine {
    atoms: Vec<DisplayAtom>,
}

impl DisplayLine {
    pub fn new(atoms: Vec<DisplayAtom>) -> Self {
        Self { atoms }
    }

    pub fn atoms(&self) -> &[DisplayAtom] {
        &self.atoms
    }

    pub fn atoms_mut(&mut self) -> &mut Vec<DisplayAtom> {
        &mut self.atoms
    }

    pub fn insert(&mut self, idx: usize, atom: DisplayAtom) {
        self.atoms.insert(idx, atom);
    }

    pub fn push(&mut self, atom: DisplayAtom) {
        self.atoms.push(atom);
    }

    /// Buffer range covered by the line's buffer atoms
    pub fn range(&self) -> Option<BufferRange> {
        let begin = self.atoms.iter().find_map(DisplayAtom::begin)?;
        let end = self.atoms.iter().rev().find_map(DisplayAtom::end)?;
        Some(BufferRange::new(begin, end))
    }

    pub fn width(&self, buffer: &Buffer) -> usize {
        self.atoms.iter().map(|atom| atom.width(buffer)).sum()
    }

    /// Concatenated text of all atoms
    pub fn content(&self, buffer: &Buffer) -> String {
        self.atoms.iter().map(|atom| atom.text_in(buffer)).collect()
    }

    /// Merge `style` into every buffer atom inside `range`
    ///
    /// Atoms straddling the range boundaries are split first, so only the
    /// covered text changes style.
    pub fn apply_style(&mut self, range: BufferRange, style: Style) {
        let mut i = 0;
        while i < self.atoms.len() {
            let (begin, end) = match self.atoms[i].content {
                AtomContent::Range { begin, end } => (begin, end),
                AtomContent::Text(_) => {
                    i += 1;
                    continue;
                }
            };
            if end <= range.begin || begin >= range.end {
                i += 1;
                continue;
            }
            if begin < range.begin {
                let tail = self.atoms[i].split_at(range.begin);
                self.atoms.insert(i + 1, tail);
                i += 1;
                continue;
            }
            if end > range.end {
                let tail = self.atoms[i].split_at(range.end);
                self.atoms.insert(i + 1, tail);
            }
            self.atoms[i].style = self.atoms[i].style.merge(style);
            i += 1;
        }
    }

    /// Merge `style` into every atom of the line
    pub fn apply_style_all(&mut self, style: Style) {
        for atom in &mut self.atoms {
            atom.style = atom.style.merge(style);
        }
    }

    /// Cut the line after `width` columns, returning the remainder
    ///
    /// Returns None when the line already fits.
    pub fn split_at_width(&mut self, buffer: &Buffer, width: usize) -> Option<DisplayLine> {
        let mut used = 0;
        for idx in 0..self.atoms.len() {
            let atom_width = self.atoms[idx].width(buffer);
            if used + atom_width <= width {
                used += atom_width;
                continue;
            }
            let mut rest = self.atoms.split_off(idx + 1);
            if let Some(tail) = self.atoms[idx].split_at_width(buffer, width - used) {
                rest.insert(0, tail);
            }
            if self.atoms[idx].text_in(buffer).is_empty() {
                self.atoms.remove(idx);
            }
            return Some(DisplayLine::new(rest));
        }
        None
    }

    /// Width of the replacement text before the first buffer atom
    pub fn prefix_width(&self, buffer: &Buffer) -> usize {
        self.atoms
            .iter()
            .take_while(|atom| !atom.has_buffer_range())
            .map(|atom| atom.width(buffer))
            .sum()
    }

    /// Scroll the text by `first_column` and cut the line to `width`
    ///
    /// Leading replacement text such as a gutter stays in place.
    pub fn trim(&mut self, buffer: &Buffer, first_column: usize, width: usize) {
        if first_column > 0 {
            let prefix_len = self.atoms.iter().take_while(|atom| !atom.has_buffer_range()).count();
            let mut body = DisplayLine::new(self.atoms.split_off(prefix_len));
            if let Some(rest) = body.split_at_width(buffer, first_column) {
                self.atoms.extend(rest.atoms);
            }
        }
        self.split_at_width(buffer, width);
    }

    /// Merge neighbouring atoms that display contiguous text in one style
    pub fn optimize(&mut self) {
        let mut merged: Vec<DisplayAtom> = Vec::with_capacity(self.atoms.len());
        for atom in self.atoms.drain(..) {
            if let Some(last) = merged.last_mut() {
                if last.style == atom.style {
                    match (&mut last.content, &atom.content) {
                        (
                            AtomContent::Range { end, .. },
                            AtomContent::Range { begin, end: next_end },
                        ) if *end == *begin => {
                            *end = *next_end;
                            continue;
                        }
                        (AtomContent::Text(text), AtomContent::Text(next)) => {
                            text.push_str(next);
                            continue;
                        }
                        _ => {}
                    }
                }
            }
            merged.push(atom);
        }
        self.atoms = merged;
    }
}

/// The visual grid highlighters write into
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayBuffer {
    lines: Vec<DisplayLine>,
    range: BufferRange,
}

impl DisplayBuffer {
    /// One display line per buffer line in `first_line..first_line + count`
    pub fn from_buffer(buffer: &Buffer, first_line: usize, count: usize) -> Self {
        let range = buffer.line_range(first_line, count);
        let lines = (range.begin.line..(first_line + count).min(buffer.line_count()))
            .map(|line| {
                let len = buffer.line(line).map_or(0, str::len);
                DisplayLine::new(vec![DisplayAtom::from_range(
                    BufferCoord::new(line, 0),
                    BufferCoord::new(line, len),
                )])
            })
            .collect();
        Self { lines, range }
    }

    pub fn lines(&self) -> &[DisplayLine] {
        &self.lines
    }

    pub fn lines_mut(&mut self) -> &mut Vec<DisplayLine> {
        &mut self.lines
    }

    /// Buffer range this display buffer was built from
    pub fn range(&self) -> BufferRange {
        self.range
    }

    /// Region-scoped style write across all lines
    pub fn apply_style(&mut self, range: BufferRange, style: Style) {
        for line in &mut self.lines {
            line.apply_style(range, style);
        }
    }

    pub fn optimize(&mut self) {
        for line in &mut self.lines {
            line.optimize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    fn sample() -> Buffer {
        Buffer::from_text("sample", "hello world\nsecond line\nthird")
    }

    #[test]
    fn test_from_buffer() {
        let buffer = sample();
        let db = DisplayBuffer::from_buffer(&buffer, 1, 5);
        assert_eq!(db.lines().len(), 2);
        assert_eq!(db.lines()[0].content(&buffer), "second line");
        assert_eq!(db.range().begin, BufferCoord::new(1, 0));
        assert_eq!(db.range().end, BufferCoord::new(2, 5));
    }

    #[test]
    fn test_apply_style_splits_atoms() {
        let buffer = sample();
        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 1);
        let red = Style::fg(Color::Red);
        db.apply_style(
            BufferRange::new(BufferCoord::new(0, 6), BufferCoord::new(0, 11)),
            red,
        );

        let atoms = db.lines()[0].atoms();
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[0].text_in(&buffer), "hello ");
        assert!(atoms[0].style.is_default());
        assert_eq!(atoms[1].text_in(&buffer), "world");
        assert_eq!(atoms[1].style, red);
    }

    #[test]
    fn test_apply_style_middle() {
        let buffer = sample();
        let mut line = DisplayBuffer::from_buffer(&buffer, 0, 1).lines()[0].clone();
        line.apply_style(
            BufferRange::new(BufferCoord::new(0, 2), BufferCoord::new(0, 4)),
            Style::reverse(),
        );
        let texts: Vec<_> = line.atoms().iter().map(|a| a.text_in(&buffer)).collect();
        assert_eq!(texts, vec!["he", "ll", "o world"]);
        assert!(line.atoms()[1].style.reverse);
    }

    #[test]
    fn test_text_atoms_untouched_by_range_style() {
        let buffer = sample();
        let mut line = DisplayBuffer::from_buffer(&buffer, 0, 1).lines()[0].clone();
        line.insert(0, DisplayAtom::text("1 ", Style::default()));
        line.apply_style(
            BufferRange::new(BufferCoord::new(0, 0), BufferCoord::new(1, 0)),
            Style::fg(Color::Blue),
        );
        assert!(line.atoms()[0].style.is_default());
        assert_eq!(line.atoms()[1].style.fg, Color::Blue);
        assert_eq!(line.content(&buffer), "1 hello world");
    }

    #[test]
    fn test_split_at_width() {
        let buffer = sample();
        let mut line = DisplayBuffer::from_buffer(&buffer, 0, 1).lines()[0].clone();
        let rest = line.split_at_width(&buffer, 4).unwrap();
        assert_eq!(line.content(&buffer), "hell");
        assert_eq!(rest.content(&buffer), "o world");
        assert_eq!(rest.range().unwrap().begin, BufferCoord::new(0, 4));

        let mut short = DisplayBuffer::from_buffer(&buffer, 2, 1).lines()[0].clone();
        assert!(short.split_at_width(&buffer, 10).is_none());
    }

    #[test]
    fn test_split_wide_chars() {
        let buffer = Buffer::from_text("wide", "你好世界");
        let mut line = DisplayBuffer::from_buffer(&buffer, 0, 1).lines()[0].clone();
        // Three columns only fit one double-width char
        let rest = line.split_at_width(&buffer, 3).unwrap();
        assert_eq!(line.content(&buffer), "你");
        assert_eq!(rest.content(&buffer), "好世界");
    }

    #[test]
    fn test_trim() {
        let buffer = sample();
        let mut line = DisplayBuffer::from_buffer(&buffer, 0, 1).lines()[0].clone();
        line.trim(&buffer, 2, 5);
        assert_eq!(line.content(&buffer), "llo w");
    }

    #[test]
    fn test_trim_keeps_gutter() {
        let buffer = sample();
        let mut line = DisplayBuffer::from_buffer(&buffer, 0, 1).lines()[0].clone();
        line.insert(0, DisplayAtom::text("1 ", Style::default().with_dim()));
        assert_eq!(line.prefix_width(&buffer), 2);
        line.trim(&buffer, 6, 5);
        assert_eq!(line.content(&buffer), "1 wor");
    }

    #[test]
    fn test_optimize_merges_contiguous() {
        let buffer = sample();
        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 1);
        db.apply_style(
            BufferRange::new(BufferCoord::new(0, 2), BufferCoord::new(0, 4)),
            Style::default(),
        );
        assert_eq!(db.lines()[0].atoms().len(), 3);
        db.optimize();
        assert_eq!(db.lines()[0].atoms().len(), 1);
        assert_eq!(db.lines()[0].content(&buffer), "hello world");
    }
}
