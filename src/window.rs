//! Window - a viewport into a buffer driven by a highlighter tree
//!
//! Each frame the window asks its highlighters for a layout (wrap, then
//! move passes), builds a display buffer for the chosen lines, runs every
//! render pass over it and finally fits it to the window.

use crate::buffer::{floor_char_boundary, Buffer};
use crate::context::Context;
use crate::coord::{BufferCoord, DisplayCoord};
use crate::display_buffer::{str_width, DisplayBuffer};
use crate::error::Result;
use crate::group::HighlighterGroup;
use crate::highlighter::{Highlighter, LayoutRequest, RenderContext};
use crate::pass::HighlightPass;

/// A window displaying a portion of a buffer
pub struct Window {
    /// First visible buffer line and display column
    position: DisplayCoord,
    /// Number of text rows and columns (excluding mode line)
    dimensions: DisplayCoord,
    /// Root of the highlighter tree
    highlighters: HighlighterGroup,
    /// Ids skipped when rendering, wherever they are in the tree
    disabled_ids: Vec<String>,
    display_buffer: DisplayBuffer,
    /// Layout chosen for the last frame
    layout: LayoutRequest,
}

impl Window {
    pub fn new(dimensions: DisplayCoord) -> Self {
        Self {
            position: DisplayCoord::default(),
            dimensions,
            highlighters: HighlighterGroup::default(),
            disabled_ids: Vec::new(),
            display_buffer: DisplayBuffer::default(),
            layout: LayoutRequest::default(),
        }
    }

    pub fn position(&self) -> DisplayCoord {
        self.position
    }

    pub fn dimensions(&self) -> DisplayCoord {
        self.dimensions
    }

    /// Set window size (call after resize event)
    pub fn set_dimensions(&mut self, dimensions: DisplayCoord) {
        self.dimensions = dimensions;
    }

    pub fn highlighters(&self) -> &HighlighterGroup {
        &self.highlighters
    }

    pub fn highlighters_mut(&mut self) -> &mut HighlighterGroup {
        &mut self.highlighters
    }

    pub fn disabled_ids(&self) -> &[String] {
        &self.disabled_ids
    }

    /// Replace the disable list
    ///
    /// Every id must exist somewhere in the highlighter tree.
    pub fn set_disabled(&mut self, disabled_ids: Vec<String>) -> Result<()> {
        self.highlighters.validate_disabled(&disabled_ids)?;
        tracing::debug!(disabled = ?disabled_ids, "updated disabled highlighters");
        self.disabled_ids = disabled_ids;
        Ok(())
    }

    /// Display buffer produced by the last update
    pub fn display_buffer(&self) -> &DisplayBuffer {
        &self.display_buffer
    }

    /// Layout chosen by the last update
    pub fn layout(&self) -> &LayoutRequest {
        &self.layout
    }

    /// Ensure cursor is visible, adjusting the position if needed
    fn ensure_cursor_visible(&mut self, cursor: BufferCoord, cursor_column: usize) {
        let height = self.dimensions.line.max(1);
        if cursor.line < self.position.line {
            self.position.line = cursor.line;
        } else if cursor.line >= self.position.line + height {
            self.position.line = cursor.line + 1 - height;
        }

        let width = self.dimensions.column.max(1);
        if cursor_column < self.position.column {
            self.position.column = cursor_column;
        } else if cursor_column >= self.position.column + width {
            self.position.column = cursor_column + 1 - width;
        }
    }

    /// Compute the layout and render a new display buffer
    pub fn update_display_buffer(&mut self, buffer: &Buffer, cursor: BufferCoord) -> &DisplayBuffer {
        let cursor_text = buffer.line(cursor.line).unwrap_or("");
        let cursor_column = str_width(&cursor_text[..floor_char_boundary(cursor_text, cursor.column)]);
        self.ensure_cursor_visible(cursor, cursor_column);

        let context = Context::new(buffer, cursor, self.dimensions);
        let mut layout = LayoutRequest {
            window_pos: self.position,
            window_range: self.dimensions,
            cursor_pos: DisplayCoord::new(
                cursor.line - self.position.line,
                cursor_column - self.position.column,
            ),
            scroll_offset: DisplayCoord::default(),
            full_lines: false,
        };

        for pass in [HighlightPass::WRAP, HighlightPass::MOVE] {
            let ctx = RenderContext::new(&context, pass).with_disabled(&self.disabled_ids);
            self.highlighters.propose_layout(ctx, &mut layout);
        }
        layout.window_pos.line = layout.window_pos.line.min(buffer.line_count().saturating_sub(1));
        self.position = layout.window_pos;

        let mut display_buffer = DisplayBuffer::from_buffer(buffer, layout.window_pos.line, layout.window_range.line);
        let range = display_buffer.range();
        for pass in HighlightPass::ORDER {
            let ctx = RenderContext::new(&context, pass).with_disabled(&self.disabled_ids);
            self.highlighters.render(ctx, &mut display_buffer, range);
        }

        if !layout.full_lines {
            // Scroll further when a gutter hides the cursor column
            let gutter = display_buffer
                .lines()
                .iter()
                .map(|line| line.prefix_width(buffer))
                .max()
                .unwrap_or(0);
            let text_width = self.dimensions.column.saturating_sub(gutter).max(1);
            if layout.cursor_pos.column >= text_width {
                let shift = layout.cursor_pos.column + 1 - text_width;
                layout.window_pos.column += shift;
                layout.cursor_pos.column -= shift;
                self.position = layout.window_pos;
            }
            for line in display_buffer.lines_mut() {
                line.trim(buffer, layout.window_pos.column, self.dimensions.column);
            }
        }
        display_buffer.lines_mut().truncate(self.dimensions.line);
        display_buffer.optimize();

        tracing::trace!(
            window_pos = ?layout.window_pos,
            cursor_pos = ?layout.cursor_pos,
            lines = display_buffer.lines().len(),
            "updated display buffer"
        );
        self.layout = layout;
        self.display_buffer = display_buffer;
        &self.display_buffer
    }

    /// Screen position of a buffer coordinate in the last display buffer
    ///
    /// A coordinate at the end of a line maps to the column after its last
    /// atom. Returns None when the coordinate is not displayed.
    pub fn display_position(&self, buffer: &Buffer, coord: BufferCoord) -> Option<DisplayCoord> {
        let mut line_end = None;
        for (row, line) in self.display_buffer.lines().iter().enumerate() {
            let mut column = 0;
            for atom in line.atoms() {
                let width = atom.width(buffer);
                if let (Some(begin), Some(end)) = (atom.begin(), atom.end()) {
                    if begin <= coord && coord < end {
                        return Some(DisplayCoord::new(row, column + str_width(buffer.slice(begin, coord))));
                    }
                    if coord == end {
                        line_end = Some(DisplayCoord::new(row, column + width));
                    }
                }
                column += width;
            }
        }
        line_end
    }
}
