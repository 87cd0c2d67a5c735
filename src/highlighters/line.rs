//! Line highlighter - one face over a whole buffer line

use crate::coord::{BufferCoord, BufferRange};
use crate::display_buffer::DisplayBuffer;
use crate::error::{HighlightError, Result};
use crate::highlighter::{Highlighter, HighlighterAndId, RenderContext};
use crate::params::ParametersParser;
use crate::pass::HighlightPass;
use crate::style::Style;

pub struct LineHighlighter {
    /// 0-indexed buffer line
    line: usize,
    style: Style,
}

impl LineHighlighter {
    pub fn new(line: usize, style: Style) -> Self {
        Self { line, style }
    }
}

impl Highlighter for LineHighlighter {
    fn passes(&self) -> HighlightPass {
        HighlightPass::COLORIZE
    }

    fn do_render(&mut self, _ctx: RenderContext<'_>, display_buffer: &mut DisplayBuffer, range: BufferRange) {
        if self.line < range.begin.line || self.line > range.end.line {
            return;
        }
        let line_range = BufferRange::new(
            BufferCoord::new(self.line, 0),
            BufferCoord::new(self.line + 1, 0),
        );
        display_buffer.apply_style(line_range, self.style);
    }
}

pub fn create(params: &[String]) -> Result<HighlighterAndId> {
    let parser = ParametersParser::new(params, &[], 2, Some(2))?;
    let (line_param, face) = (parser.positional()[0], parser.positional()[1]);
    let line = match line_param.parse::<usize>() {
        Ok(line) if line > 0 => line,
        _ => {
            return Err(HighlightError::bad_params(format!(
                "invalid line number: '{}'",
                line_param
            )))
        }
    };
    let style = Style::parse(face)?;
    Ok((
        format!("line_{}_{}", line, face),
        Box::new(LineHighlighter::new(line - 1, style)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::context::Context;
    use crate::coord::DisplayCoord;
    use crate::style::Color;

    fn params(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_line() {
        let buffer = Buffer::from_text("test", "one\ntwo\nthree");
        let context = Context::new(&buffer, BufferCoord::default(), DisplayCoord::new(10, 80));
        let (id, mut line) = create(&params(&["2", "red"])).unwrap();
        assert_eq!(id, "line_2_red");

        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 3);
        let range = db.range();
        line.render(RenderContext::new(&context, HighlightPass::COLORIZE), &mut db, range);
        assert!(db.lines()[0].atoms()[0].style.is_default());
        assert_eq!(db.lines()[1].atoms()[0].style.fg, Color::Red);
        assert!(db.lines()[2].atoms()[0].style.is_default());
    }

    #[test]
    fn test_line_bad_params() {
        assert!(matches!(create(&params(&["0", "red"])), Err(HighlightError::BadParameters(_))));
        assert!(create(&params(&["x", "red"])).is_err());
        assert!(create(&params(&["3"])).is_err());
    }
}
