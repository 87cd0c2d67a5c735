//! Cursor highlighter

use crate::buffer::floor_char_boundary;
use crate::coord::{BufferCoord, BufferRange};
use crate::display_buffer::DisplayBuffer;
use crate::error::Result;
use crate::highlighter::{Highlighter, HighlighterAndId, RenderContext};
use crate::params::ParametersParser;
use crate::pass::HighlightPass;
use crate::style::Style;

/// Styles the character under the cursor
///
/// Nothing is styled when the cursor sits past the end of its line.
pub struct CursorHighlighter {
    style: Style,
}

impl CursorHighlighter {
    pub fn new(style: Style) -> Self {
        Self { style }
    }
}

impl Highlighter for CursorHighlighter {
    fn passes(&self) -> HighlightPass {
        HighlightPass::COLORIZE
    }

    fn do_render(&mut self, ctx: RenderContext<'_>, display_buffer: &mut DisplayBuffer, range: BufferRange) {
        let cursor = ctx.context.cursor();
        if cursor.line < range.begin.line || cursor.line > range.end.line {
            return;
        }
        let Some(text) = ctx.context.buffer().line(cursor.line) else {
            return;
        };
        let begin = floor_char_boundary(text, cursor.column);
        let Some(ch) = text[begin..].chars().next() else {
            return;
        };
        display_buffer.apply_style(
            BufferRange::new(
                BufferCoord::new(cursor.line, begin),
                BufferCoord::new(cursor.line, begin + ch.len_utf8()),
            ),
            self.style,
        );
    }
}

pub fn create(params: &[String]) -> Result<HighlighterAndId> {
    let parser = ParametersParser::new(params, &[], 0, Some(1))?;
    let style = match parser.positional().first() {
        Some(face) => Style::parse(face)?,
        None => Style::reverse(),
    };
    Ok(("cursor".to_string(), Box::new(CursorHighlighter::new(style))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::context::Context;
    use crate::coord::DisplayCoord;
    use crate::style::Color;

    fn render_at(buffer: &Buffer, cursor: BufferCoord, params: &[String]) -> DisplayBuffer {
        let context = Context::new(buffer, cursor, DisplayCoord::new(10, 80));
        let (_, mut hl) = create(params).unwrap();
        let mut db = DisplayBuffer::from_buffer(buffer, 0, buffer.line_count());
        let range = db.range();
        hl.render(RenderContext::new(&context, HighlightPass::COLORIZE), &mut db, range);
        db
    }

    #[test]
    fn test_cursor_cell_reversed() {
        let buffer = Buffer::from_text("test", "abc\ndef");
        let db = render_at(&buffer, BufferCoord::new(1, 1), &[]);

        let atoms = db.lines()[1].atoms();
        let texts: Vec<_> = atoms.iter().map(|a| a.text_in(&buffer)).collect();
        assert_eq!(texts, vec!["d", "e", "f"]);
        assert!(atoms[1].style.reverse);
        assert!(!atoms[0].style.reverse);
        assert_eq!(db.lines()[0].atoms().len(), 1);
    }

    #[test]
    fn test_cursor_multibyte() {
        let buffer = Buffer::from_text("test", "aé b");
        let db = render_at(&buffer, BufferCoord::new(0, 1), &["red".to_string()]);
        let styled = db.lines()[0]
            .atoms()
            .iter()
            .find(|a| a.style.fg == Color::Red)
            .unwrap();
        assert_eq!(styled.text_in(&buffer), "é");
    }

    #[test]
    fn test_cursor_at_line_end() {
        let buffer = Buffer::from_text("test", "abc");
        let db = render_at(&buffer, BufferCoord::new(0, 3), &[]);
        assert_eq!(db.lines()[0].atoms().len(), 1);
        assert!(db.lines()[0].atoms()[0].style.is_default());
    }
}
