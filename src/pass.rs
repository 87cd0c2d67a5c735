//! Rendering passes
//!
//! A frame is produced in three passes. Wrap and Move affect the layout
//! of the window and run first; Colorize paints the display buffer.

use bitflags::bitflags;

use crate::error::{HighlightError, Result};

bitflags! {
    /// Set of passes a highlighter participates in
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct HighlightPass: u8 {
        const WRAP = 1 << 0;
        const MOVE = 1 << 1;
        const COLORIZE = 1 << 2;

        const ALL = Self::WRAP.bits() | Self::MOVE.bits() | Self::COLORIZE.bits();
    }
}

impl HighlightPass {
    /// The passes in execution order
    pub const ORDER: [HighlightPass; 3] = [Self::WRAP, Self::MOVE, Self::COLORIZE];

    /// Parse a `|` separated pass list, e.g. `wrap|move`
    pub fn parse(s: &str) -> Result<Self> {
        let mut passes = HighlightPass::empty();
        for name in s.split('|') {
            passes |= match name.trim() {
                "wrap" => HighlightPass::WRAP,
                "move" => HighlightPass::MOVE,
                "colorize" => HighlightPass::COLORIZE,
                "all" => HighlightPass::ALL,
                other => {
                    return Err(HighlightError::bad_params(format!(
                        "invalid highlight pass: '{}'",
                        other
                    )))
                }
            };
        }
        Ok(passes)
    }

    /// Passes that affect window layout rather than paint
    pub fn is_layout(&self) -> bool {
        self.intersects(HighlightPass::WRAP | HighlightPass::MOVE)
    }
}

impl Default for HighlightPass {
    fn default() -> Self {
        HighlightPass::ALL
    }
}
