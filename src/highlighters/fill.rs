//! Fill highlighter - one face over all displayed buffer text

use crate::coord::BufferRange;
use crate::display_buffer::DisplayBuffer;
use crate::error::Result;
use crate::highlighter::{Highlighter, HighlighterAndId, RenderContext};
use crate::params::ParametersParser;
use crate::pass::HighlightPass;
use crate::style::Style;

pub struct FillHighlighter {
    style: Style,
}

impl FillHighlighter {
    pub fn new(style: Style) -> Self {
        Self { style }
    }
}

impl Highlighter for FillHighlighter {
    fn passes(&self) -> HighlightPass {
        HighlightPass::COLORIZE
    }

    fn do_render(&mut self, _ctx: RenderContext<'_>, display_buffer: &mut DisplayBuffer, range: BufferRange) {
        display_buffer.apply_style(range, self.style);
    }
}

pub fn create(params: &[String]) -> Result<HighlighterAndId> {
    let parser = ParametersParser::new(params, &[], 1, Some(1))?;
    let face = parser.positional()[0];
    let style = Style::parse(face)?;
    Ok((format!("fill_{}", face), Box::new(FillHighlighter::new(style))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Buffer;
    use crate::context::Context;
    use crate::coord::{BufferCoord, DisplayCoord};
    use crate::error::HighlightError;
    use crate::style::Color;

    #[test]
    fn test_fill() {
        let buffer = Buffer::from_text("test", "one\ntwo");
        let context = Context::new(&buffer, BufferCoord::default(), DisplayCoord::new(10, 80));
        let (id, mut fill) = create(&["black,yellow".to_string()]).unwrap();
        assert_eq!(id, "fill_black,yellow");

        let mut db = DisplayBuffer::from_buffer(&buffer, 0, 2);
        let range = db.range();
        fill.render(RenderContext::new(&context, HighlightPass::COLORIZE), &mut db, range);
        for line in db.lines() {
            assert_eq!(line.atoms()[0].style.bg, Color::Yellow);
        }
    }

    #[test]
    fn test_fill_bad_face() {
        assert!(matches!(create(&["nocolor".to_string()]), Err(HighlightError::BadParameters(_))));
        assert!(create(&[]).is_err());
    }
}
