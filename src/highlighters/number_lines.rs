//! Line number gutter

use crate::coord::BufferRange;
use crate::display_buffer::{str_width, DisplayAtom, DisplayBuffer};
use crate::error::Result;
use crate::highlighter::{Highlighter, HighlighterAndId, LayoutRequest, RenderContext};
use crate::params::{ParametersParser, SwitchDesc};
use crate::pass::HighlightPass;
use crate::style::Style;

/// Prepends a line number to each display line starting a buffer line
///
/// Continuation rows produced by wrapping get a blank gutter of the same
/// width so the text stays aligned. During the wrap pass the gutter is taken
/// out of the layout width, so wrapped rows plus gutter fit the window.
pub struct NumberLinesHighlighter {
    relative: bool,
    hl_cursor: bool,
    separator: String,
}

impl NumberLinesHighlighter {
    pub fn new(relative: bool, hl_cursor: bool, separator: impl Into<String>) -> Self {
        Self {
            relative,
            hl_cursor,
            separator: separator.into(),
        }
    }

    /// Number of digits reserved for line numbers (at least 3)
    fn digits(line_count: usize) -> usize {
        line_count.to_string().len().max(3)
    }

    fn gutter_width(&self, line_count: usize) -> usize {
        Self::digits(line_count) + str_width(&self.separator)
    }

    fn number_for(&self, line: usize, cursor_line: usize) -> usize {
        if self.relative && line != cursor_line {
            line.abs_diff(cursor_line)
        } else {
            line + 1
        }
    }
}

impl Highlighter for NumberLinesHighlighter {
    fn passes(&self) -> HighlightPass {
        HighlightPass::WRAP | HighlightPass::COLORIZE
    }

    fn do_render(&mut self, ctx: RenderContext<'_>, display_buffer: &mut DisplayBuffer, _range: BufferRange) {
        if !ctx.pass.contains(HighlightPass::COLORIZE) {
            return;
        }
        let cursor_line = ctx.context.cursor().line;
        let digits = Self::digits(ctx.context.buffer().line_count());
        let number_style = Style::default().with_dim();
        let cursor_style = Style::default().with_bold();
        let padding = " ".repeat(digits + str_width(&self.separator));

        for line in display_buffer.lines_mut() {
            let Some(range) = line.range() else {
                continue;
            };
            let buffer_line = range.begin.line;
            let style = if self.hl_cursor && buffer_line == cursor_line {
                cursor_style
            } else {
                number_style
            };
            let gutter = if range.begin.column == 0 {
                format!(
                    "{:>width$}{}",
                    self.number_for(buffer_line, cursor_line),
                    self.separator,
                    width = digits
                )
            } else {
                padding.clone()
            };
            line.insert(0, DisplayAtom::text(gutter, style));
        }
    }

    fn do_propose_layout(&mut self, ctx: RenderContext<'_>, layout: &mut LayoutRequest) {
        let gutter = self.gutter_width(ctx.context.buffer().line_count());
        layout.window_range.column = layout.window_range.column.saturating_sub(gutter).max(1);
    }
}

const NUMBER_LINES_SWITCHES: [SwitchDesc; 3] = [
    SwitchDesc::flag("relative"),
    SwitchDesc::flag("hlcursor"),
    SwitchDesc::with_arg("separator"),
];

pub fn create(params: &[String]) -> Result<HighlighterAndId> {
    let parser = ParametersParser::new(params, &NUMBER_LINES_SWITCHES, 0, Some(0))?;
    let highlighter = NumberLinesHighlighter::new(
        parser.has("relative"),
        parser.has("hlcursor"),
        parser.get("separator").unwrap_or(" "),
    );
    Ok(("number-lines".to_string(), Box::new(highlighter)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::context::Context;
    use crate::coord::{BufferCoord, DisplayCoord};
    use crate::error::HighlightError;

    fn params(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn gutters(db: &DisplayBuffer, buffer: &Buffer) -> Vec<String> {
        db.lines()
            .iter()
            .map(|line| line.atoms()[0].text_in(buffer).to_string())
            .collect()
    }

    #[test]
    fn test_absolute_numbers() {
        let buffer = Buffer::from_text("test", "a\nb\nc");
        let context = Context::new(&buffer, BufferCoord::new(1, 0), DisplayCoord::new(10, 80));
        let (id, mut hl) = create(&[]).unwrap();
        assert_eq!(id, "number-lines");

        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 3);
        let range = db.range();
        hl.render(RenderContext::new(&context, HighlightPass::COLORIZE), &mut db, range);

        assert_eq!(gutters(&db, &buffer), vec!["  1 ", "  2 ", "  3 "]);
        assert_eq!(db.lines()[2].content(&buffer), "  3 c");
        assert!(db.lines()[0].atoms()[0].style.dim);
    }

    #[test]
    fn test_relative_numbers_with_cursor() {
        let buffer = Buffer::from_text("test", "a\nb\nc\nd");
        let context = Context::new(&buffer, BufferCoord::new(2, 0), DisplayCoord::new(10, 80));
        let (_, mut hl) = create(&params(&["-relative", "-hlcursor", "-separator", "|"])).unwrap();

        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 4);
        let range = db.range();
        hl.render(RenderContext::new(&context, HighlightPass::COLORIZE), &mut db, range);

        assert_eq!(gutters(&db, &buffer), vec!["  2|", "  1|", "  3|", "  1|"]);
        assert!(db.lines()[2].atoms()[0].style.bold);
        assert!(!db.lines()[1].atoms()[0].style.bold);
    }

    #[test]
    fn test_continuation_rows_padded() {
        let buffer = Buffer::from_text("test", "abcdef");
        let context = Context::new(&buffer, BufferCoord::default(), DisplayCoord::new(10, 80));
        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 1);
        let rest = db.lines_mut()[0].split_at_width(&buffer, 3).unwrap();
        db.lines_mut().push(rest);

        let mut hl = NumberLinesHighlighter::new(false, false, " ");
        let range = db.range();
        hl.render(RenderContext::new(&context, HighlightPass::COLORIZE), &mut db, range);
        assert_eq!(gutters(&db, &buffer), vec!["  1 ", "    "]);
    }

    #[test]
    fn test_wide_buffers_grow_gutter() {
        let text = vec!["x"; 1200].join("\n");
        let buffer = Buffer::from_text("test", &text);
        let context = Context::new(&buffer, BufferCoord::default(), DisplayCoord::new(10, 80));
        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 1);
        let range = db.range();
        NumberLinesHighlighter::new(false, false, " ").render(
            RenderContext::new(&context, HighlightPass::COLORIZE),
            &mut db,
            range,
        );
        assert_eq!(gutters(&db, &buffer), vec!["   1 "]);
    }

    #[test]
    fn test_gutter_reserved_in_layout() {
        let buffer = Buffer::from_text("test", "a\nb");
        let context = Context::new(&buffer, BufferCoord::default(), DisplayCoord::new(10, 20));
        let mut hl = NumberLinesHighlighter::new(false, false, "|");
        let mut layout = LayoutRequest {
            window_range: DisplayCoord::new(10, 20),
            ..LayoutRequest::default()
        };

        hl.propose_layout(RenderContext::new(&context, HighlightPass::WRAP), &mut layout);
        assert_eq!(layout.window_range.column, 16);
        hl.propose_layout(RenderContext::new(&context, HighlightPass::MOVE), &mut layout);
        assert_eq!(layout.window_range.column, 16);

        // The gutter is only drawn in the colorize pass
        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 2);
        let range = db.range();
        hl.render(RenderContext::new(&context, HighlightPass::WRAP), &mut db, range);
        assert_eq!(db.lines()[0].content(&buffer), "a");
    }

    #[test]
    fn test_bad_params() {
        assert!(matches!(create(&params(&["-absolute"])), Err(HighlightError::BadParameters(_))));
        assert!(create(&params(&["extra"])).is_err());
        assert!(create(&params(&["-separator"])).is_err());
    }
}
