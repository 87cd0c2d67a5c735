//! Scroll margin - keeps lines and columns visible around the cursor

use crate::coord::{BufferRange, DisplayCoord};
use crate::display_buffer::DisplayBuffer;
use crate::error::{HighlightError, Result};
use crate::highlighter::{Highlighter, HighlighterAndId, LayoutRequest, RenderContext};
use crate::params::ParametersParser;
use crate::pass::HighlightPass;

/// Moves the window so the cursor keeps a margin from its edges
///
/// Margins are capped at half the window size. The window never scrolls
/// past the last buffer line to honor the margin.
///
/// The margin is announced in the wrap pass and applied in the move pass.
/// Once lines are wrapped the wrapping highlighter counts rows and keeps the
/// margin itself.
pub struct ScrollMarginHighlighter {
    lines: usize,
    columns: usize,
}

impl ScrollMarginHighlighter {
    pub fn new(lines: usize, columns: usize) -> Self {
        Self { lines, columns }
    }
}

impl Highlighter for ScrollMarginHighlighter {
    fn passes(&self) -> HighlightPass {
        HighlightPass::WRAP | HighlightPass::MOVE
    }

    fn do_render(&mut self, _ctx: RenderContext<'_>, _display_buffer: &mut DisplayBuffer, _range: BufferRange) {}

    fn do_propose_layout(&mut self, ctx: RenderContext<'_>, layout: &mut LayoutRequest) {
        let dimensions = ctx.context.dimensions();
        let offset = DisplayCoord::new(
            self.lines.min(dimensions.line.saturating_sub(1) / 2),
            self.columns.min(dimensions.column.saturating_sub(1) / 2),
        );
        layout.scroll_offset = offset;
        if !ctx.pass.contains(HighlightPass::MOVE) || layout.full_lines {
            return;
        }

        let height = dimensions.line;
        if layout.cursor_pos.line < offset.line {
            let shift = (offset.line - layout.cursor_pos.line).min(layout.window_pos.line);
            layout.window_pos.line -= shift;
            layout.cursor_pos.line += shift;
        } else if layout.cursor_pos.line + offset.line >= height {
            let wanted = layout.cursor_pos.line + offset.line + 1 - height;
            let last_top = ctx.context.buffer().line_count().saturating_sub(height);
            let shift = wanted
                .min(last_top.saturating_sub(layout.window_pos.line))
                .min(layout.cursor_pos.line);
            layout.window_pos.line += shift;
            layout.cursor_pos.line -= shift;
        }

        let width = layout.window_range.column.max(1);
        if layout.cursor_pos.column < offset.column {
            let shift = (offset.column - layout.cursor_pos.column).min(layout.window_pos.column);
            layout.window_pos.column -= shift;
            layout.cursor_pos.column += shift;
        } else if layout.cursor_pos.column + offset.column >= width {
            let shift = (layout.cursor_pos.column + offset.column + 1 - width).min(layout.cursor_pos.column);
            layout.window_pos.column += shift;
            layout.cursor_pos.column -= shift;
        }
    }
}

fn parse_margin(value: &str) -> Result<usize> {
    value
        .trim()
        .parse()
        .map_err(|_| HighlightError::bad_params(format!("invalid scroll margin: '{}'", value)))
}

pub fn create(params: &[String]) -> Result<HighlighterAndId> {
    let parser = ParametersParser::new(params, &[], 1, Some(1))?;
    let margin = parser.positional()[0];
    let (lines, columns) = match margin.split_once(',') {
        Some((lines, columns)) => (parse_margin(lines)?, parse_margin(columns)?),
        None => (parse_margin(margin)?, 0),
    };
    Ok(("scroll-margin".to_string(), Box::new(ScrollMarginHighlighter::new(lines, columns))))
}
