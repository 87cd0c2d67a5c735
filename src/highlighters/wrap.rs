//! Soft wrapping
//!
//! Long display lines are split into rows no wider than the wrap width.
//! During layout the highlighter counts wrapped rows so the window start
//! moves far enough for the cursor row to stay on screen. It lays out again
//! in the move pass, once gutters and scroll margins have been announced, so
//! the window then keeps the margin in wrapped rows.

use crate::buffer::floor_char_boundary;
use crate::coord::{BufferRange, DisplayCoord};
use crate::display_buffer::{char_width, str_width, DisplayAtom, DisplayBuffer};
use crate::error::{HighlightError, Result};
use crate::highlighter::{Highlighter, HighlighterAndId, LayoutRequest, RenderContext};
use crate::params::{ParametersParser, SwitchDesc};
use crate::pass::HighlightPass;
use crate::style::Style;

pub struct WrapHighlighter {
    /// Fixed wrap width, or the window width when None
    width: Option<usize>,
    /// Text shown at the start of continuation rows
    marker: String,
    /// Width chosen by the last layout
    layout_width: Option<usize>,
}

impl WrapHighlighter {
    pub fn new(width: Option<usize>, marker: impl Into<String>) -> Self {
        Self {
            width,
            marker: marker.into(),
            layout_width: None,
        }
    }

    /// Wrap width when `available` columns are left for text
    ///
    /// Continuation rows always have room for a double width char after
    /// the marker.
    fn wrap_width(&self, available: usize) -> usize {
        self.width
            .map_or(available, |width| width.min(available))
            .max(str_width(&self.marker) + 2)
    }

    /// Byte offsets at which each row of `text` starts once wrapped
    fn row_starts(&self, text: &str, width: usize) -> Vec<usize> {
        let continuation_width = width - str_width(&self.marker);
        let mut starts = vec![0];
        let mut available = width;
        let mut used = 0;
        for (idx, ch) in text.char_indices() {
            let ch_width = char_width(ch);
            if used + ch_width > available {
                starts.push(idx);
                available = continuation_width;
                used = 0;
            }
            used += ch_width;
        }
        starts
    }

    fn row_count(&self, text: Option<&str>, width: usize) -> usize {
        text.map_or(1, |text| self.row_starts(text, width).len())
    }
}

impl Highlighter for WrapHighlighter {
    fn passes(&self) -> HighlightPass {
        HighlightPass::WRAP | HighlightPass::MOVE
    }

    fn do_render(&mut self, ctx: RenderContext<'_>, display_buffer: &mut DisplayBuffer, _range: BufferRange) {
        if !ctx.pass.contains(HighlightPass::WRAP) {
            return;
        }
        let buffer = ctx.context.buffer();
        let width = self
            .layout_width
            .unwrap_or_else(|| self.wrap_width(ctx.context.dimensions().column));
        let marker_style = Style::default().with_dim();

        let lines = std::mem::take(display_buffer.lines_mut());
        let mut wrapped = Vec::with_capacity(lines.len());
        for mut line in lines {
            // The marker atom counts towards the width of continuation rows
            loop {
                let rest = line.split_at_width(buffer, width);
                wrapped.push(line);
                let Some(mut rest) = rest else {
                    break;
                };
                if !self.marker.is_empty() {
                    rest.insert(0, DisplayAtom::text(self.marker.clone(), marker_style));
                }
                line = rest;
            }
        }
        *display_buffer.lines_mut() = wrapped;
    }

    fn do_propose_layout(&mut self, ctx: RenderContext<'_>, layout: &mut LayoutRequest) {
        let buffer = ctx.context.buffer();
        let cursor = ctx.context.cursor();
        let height = ctx.context.dimensions().line.max(1);
        let width = self.wrap_width(layout.window_range.column);
        self.layout_width = Some(width);

        let cursor_text = buffer.line(cursor.line).unwrap_or("");
        let starts = self.row_starts(cursor_text, width);
        let cursor_byte = floor_char_boundary(cursor_text, cursor.column);
        let cursor_row = starts.iter().rposition(|&start| start <= cursor_byte).unwrap_or(0);
        let marker_columns = if cursor_row > 0 { str_width(&self.marker) } else { 0 };
        let cursor_column = marker_columns + str_width(&cursor_text[starts[cursor_row]..cursor_byte]);

        // The bottom margin cannot exceed the rows left below the cursor
        let margin = layout.scroll_offset.line;
        let mut below = starts.len() - cursor_row - 1;
        for line in cursor.line + 1..buffer.line_count() {
            if below >= margin {
                break;
            }
            below += self.row_count(buffer.line(line), width);
        }
        let bottom_margin = margin.min(below);

        // Rows between the window top and the cursor row
        let mut top = layout.window_pos.line.min(cursor.line);
        let mut rows: usize = (top..cursor.line)
            .map(|line| self.row_count(buffer.line(line), width))
            .sum::<usize>()
            + cursor_row;
        while top < cursor.line && rows + bottom_margin >= height {
            rows -= self.row_count(buffer.line(top), width);
            top += 1;
        }
        while top > 0 && rows < margin {
            let above = self.row_count(buffer.line(top - 1), width);
            if rows + above + bottom_margin >= height {
                break;
            }
            top -= 1;
            rows += above;
        }

        let mut used = 0;
        let mut line_count = 0;
        for line in top..buffer.line_count() {
            if used >= height {
                break;
            }
            used += self.row_count(buffer.line(line), width);
            line_count += 1;
        }

        layout.window_pos = DisplayCoord::new(top, 0);
        // Columns keep the room left for text
        layout.window_range.line = line_count.max(1);
        layout.cursor_pos = DisplayCoord::new(rows, cursor_column);
        layout.full_lines = true;
    }
}

const WRAP_SWITCHES: [SwitchDesc; 2] = [SwitchDesc::with_arg("width"), SwitchDesc::with_arg("marker")];

pub fn create(params: &[String]) -> Result<HighlighterAndId> {
    let parser = ParametersParser::new(params, &WRAP_SWITCHES, 0, Some(0))?;
    let width = parser.get_number("width")?;
    let marker = parser.get("marker").unwrap_or("");
    if let Some(width) = width {
        if width < str_width(marker) + 2 {
            return Err(HighlightError::bad_params(format!(
                "wrap width {} is too narrow for marker '{}'",
                width, marker
            )));
        }
    }
    Ok(("wrap".to_string(), Box::new(WrapHighlighter::new(width, marker))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::context::Context;
    use crate::coord::BufferCoord;

    fn params(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn contents(db: &DisplayBuffer, buffer: &Buffer) -> Vec<String> {
        db.lines().iter().map(|line| line.content(buffer)).collect()
    }

    #[test]
    fn test_wrap_to_window_width() {
        let buffer = Buffer::from_text("test", "abcdefghij\nxy");
        let context = Context::new(&buffer, BufferCoord::default(), DisplayCoord::new(10, 4));
        let (id, mut hl) = create(&[]).unwrap();
        assert_eq!(id, "wrap");

        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 2);
        let range = db.range();
        hl.render(RenderContext::new(&context, HighlightPass::WRAP), &mut db, range);
        assert_eq!(contents(&db, &buffer), vec!["abcd", "efgh", "ij", "xy"]);
        assert_eq!(db.lines()[1].range().unwrap().begin, BufferCoord::new(0, 4));
    }

    #[test]
    fn test_wrap_with_marker() {
        let buffer = Buffer::from_text("test", "abcdefgh");
        let context = Context::new(&buffer, BufferCoord::default(), DisplayCoord::new(10, 80));
        let (_, mut hl) = create(&params(&["-width", "5", "-marker", "> "])).unwrap();

        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 1);
        let range = db.range();
        hl.render(RenderContext::new(&context, HighlightPass::WRAP), &mut db, range);
        assert_eq!(contents(&db, &buffer), vec!["abcde", "> fgh"]);
        assert!(db.lines()[1].atoms()[0].style.dim);
    }

    #[test]
    fn test_wrap_only_in_wrap_pass() {
        let buffer = Buffer::from_text("test", "abcdefgh");
        let context = Context::new(&buffer, BufferCoord::default(), DisplayCoord::new(10, 4));
        let mut hl = WrapHighlighter::new(None, "");
        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 1);
        let range = db.range();
        hl.render(RenderContext::new(&context, HighlightPass::COLORIZE), &mut db, range);
        assert_eq!(db.lines().len(), 1);
    }

    #[test]
    fn test_layout_keeps_cursor_row_visible() {
        // Every line wraps into three rows of width 4
        let text = vec!["aaaabbbbcc"; 10].join("\n");
        let buffer = Buffer::from_text("test", &text);
        let cursor = BufferCoord::new(3, 9);
        let context = Context::new(&buffer, cursor, DisplayCoord::new(6, 4));
        let mut hl = WrapHighlighter::new(None, "");
        let mut layout = LayoutRequest {
            window_pos: DisplayCoord::new(0, 0),
            window_range: DisplayCoord::new(6, 4),
            ..LayoutRequest::default()
        };

        hl.propose_layout(RenderContext::new(&context, HighlightPass::WRAP), &mut layout);
        // Lines 2 and 3 fill the six rows, the cursor is on the last one
        assert_eq!(layout.window_pos, DisplayCoord::new(2, 0));
        assert_eq!(layout.cursor_pos, DisplayCoord::new(5, 1));
        assert_eq!(layout.window_range.line, 2);
        assert!(layout.full_lines);
    }

    #[test]
    fn test_layout_unchanged_window_when_cursor_fits() {
        let buffer = Buffer::from_text("test", "short\nabcdefghij\nend");
        let context = Context::new(&buffer, BufferCoord::new(1, 5), DisplayCoord::new(10, 4));
        let mut hl = WrapHighlighter::new(None, "");
        let mut layout = LayoutRequest {
            window_range: DisplayCoord::new(10, 4),
            ..LayoutRequest::default()
        };

        hl.propose_layout(RenderContext::new(&context, HighlightPass::WRAP), &mut layout);
        // "short" takes two rows, the cursor is on the second row of line 1
        assert_eq!(layout.window_pos.line, 0);
        assert_eq!(layout.cursor_pos, DisplayCoord::new(3, 1));
        assert_eq!(layout.window_range.line, 3);
    }

    #[test]
    fn test_layout_keeps_margin_in_rows() {
        // Line 0 wraps into four rows of width 10
        let text = format!("{}\nb\nc\nd\ne", "x".repeat(32));
        let buffer = Buffer::from_text("test", &text);
        let context = Context::new(&buffer, BufferCoord::new(1, 0), DisplayCoord::new(4, 10));
        let mut hl = WrapHighlighter::new(None, "");
        let mut layout = LayoutRequest {
            window_range: DisplayCoord::new(4, 10),
            scroll_offset: DisplayCoord::new(1, 0),
            ..LayoutRequest::default()
        };

        hl.propose_layout(RenderContext::new(&context, HighlightPass::MOVE), &mut layout);
        // Keeping line 0 would leave no row under the cursor
        assert_eq!(layout.window_pos.line, 1);
        assert_eq!(layout.cursor_pos.line, 0);

        // Near the top the margin pulls earlier lines back in
        let context = Context::new(&buffer, BufferCoord::new(2, 0), DisplayCoord::new(4, 10));
        let mut layout = LayoutRequest {
            window_pos: DisplayCoord::new(2, 0),
            window_range: DisplayCoord::new(4, 10),
            scroll_offset: DisplayCoord::new(1, 0),
            ..LayoutRequest::default()
        };
        hl.propose_layout(RenderContext::new(&context, HighlightPass::MOVE), &mut layout);
        assert_eq!(layout.window_pos.line, 1);
        assert_eq!(layout.cursor_pos.line, 1);
    }

    #[test]
    fn test_layout_width_narrows_to_range() {
        let buffer = Buffer::from_text("test", "abcdefghij");
        let context = Context::new(&buffer, BufferCoord::default(), DisplayCoord::new(10, 10));
        let (_, mut hl) = create(&params(&["-width", "8"])).unwrap();
        let mut layout = LayoutRequest {
            window_range: DisplayCoord::new(10, 6),
            ..LayoutRequest::default()
        };

        hl.propose_layout(RenderContext::new(&context, HighlightPass::WRAP), &mut layout);
        assert_eq!(layout.window_range.column, 6);

        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 1);
        let range = db.range();
        hl.render(RenderContext::new(&context, HighlightPass::WRAP), &mut db, range);
        assert_eq!(contents(&db, &buffer), vec!["abcdef", "ghij"]);
    }

    #[test]
    fn test_bad_params() {
        assert!(matches!(create(&params(&["-width", "1"])), Err(HighlightError::BadParameters(_))));
        assert!(create(&params(&["-width", "abc"])).is_err());
        assert!(create(&params(&["-width", "3", "-marker", ">>"])).is_err());
        assert!(create(&params(&["80"])).is_err());
    }
}
