//! The highlighter contract
//!
//! A highlighter mutates a [`DisplayBuffer`] to change the visual
//! representation of a buffer: coloring text, adding information such as
//! line numbers, or reshaping lines (wrapping). Layout highlighters can also
//! adjust the [`LayoutRequest`] that decides which part of the buffer a
//! window shows.
//!
//! Every highlighter declares the passes it takes part in when it is built.
//! [`Highlighter::render`] and [`Highlighter::propose_layout`] only forward to
//! the `do_` hooks when the current pass intersects that set, so
//! implementations never check eligibility themselves. A highlighter taking
//! part in several passes reads `ctx.pass` to tell them apart.

use crate::completion::Completions;
use crate::context::Context;
use crate::coord::{BufferRange, DisplayCoord};
use crate::display_buffer::DisplayBuffer;
use crate::error::{HighlightError, Result};
use crate::group::TreeIds;
use crate::pass::HighlightPass;

/// Proposed mapping between a window and its buffer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutRequest {
    /// Window position relative to the buffer origin
    pub window_pos: DisplayCoord,
    /// Range of lines and columns from the buffer that will get displayed
    pub window_range: DisplayCoord,
    /// Position of the cursor in the window
    pub cursor_pos: DisplayCoord,
    /// Lines and columns that must remain visible around the cursor
    pub scroll_offset: DisplayCoord,
    /// Put full lines in the display buffer instead of trimming to the window
    pub full_lines: bool,
}

/// Parameters of a single highlighter invocation
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub context: &'a Context<'a>,
    pub pass: HighlightPass,
    /// Ids skipped, along with their subtree, wherever they occur
    pub disabled_ids: &'a [String],
}

impl<'a> RenderContext<'a> {
    pub fn new(context: &'a Context<'a>, pass: HighlightPass) -> Self {
        Self {
            context,
            pass,
            disabled_ids: &[],
        }
    }

    pub fn with_disabled(mut self, disabled_ids: &'a [String]) -> Self {
        self.disabled_ids = disabled_ids;
        self
    }

    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled_ids.iter().any(|disabled| disabled == id)
    }
}

/// A highlighter together with the id it is stored under
pub type HighlighterAndId = (String, Box<dyn Highlighter>);

pub trait Highlighter {
    /// Passes this highlighter runs in, fixed at construction
    fn passes(&self) -> HighlightPass;

    /// Apply the paint effect to `display_buffer` if the pass matches
    ///
    /// Implementors override `do_render`, never this method.
    fn render(&mut self, ctx: RenderContext<'_>, display_buffer: &mut DisplayBuffer, range: BufferRange) {
        if ctx.pass.intersects(self.passes()) {
            self.do_render(ctx, display_buffer, range);
        }
    }

    /// Apply the layout effect to `layout` if the pass matches
    ///
    /// Implementors override `do_propose_layout`, never this method.
    fn propose_layout(&mut self, ctx: RenderContext<'_>, layout: &mut LayoutRequest) {
        if ctx.pass.intersects(self.passes()) {
            self.do_propose_layout(ctx, layout);
        }
    }

    fn do_render(&mut self, ctx: RenderContext<'_>, display_buffer: &mut DisplayBuffer, range: BufferRange);

    fn do_propose_layout(&mut self, _ctx: RenderContext<'_>, _layout: &mut LayoutRequest) {}

    fn has_children(&self) -> bool {
        false
    }

    /// Resolve a `/` separated path below this highlighter
    fn get_child(&self, _path: &str) -> Result<&dyn Highlighter> {
        Err(HighlightError::UnsupportedOperation)
    }

    fn get_child_mut(&mut self, _path: &str) -> Result<&mut dyn Highlighter> {
        Err(HighlightError::UnsupportedOperation)
    }

    fn add_child(&mut self, _child: HighlighterAndId) -> Result<()> {
        Err(HighlightError::UnsupportedOperation)
    }

    fn remove_child(&mut self, _id: &str) -> Result<()> {
        Err(HighlightError::UnsupportedOperation)
    }

    /// Complete a partial child path; `group_only` offers only groups
    fn complete_child(&self, _path: &str, _cursor_pos: usize, _group_only: bool) -> Result<Completions<'_>> {
        Err(HighlightError::UnsupportedOperation)
    }

    /// Share the id set of the tree this highlighter was inserted into
    fn join_tree(&mut self, _tree_ids: &TreeIds) {}

    /// Append every id in this highlighter's subtree to `out`
    fn collect_identifiers<'s>(&'s self, _out: &mut Vec<&'s str>) {}
}
