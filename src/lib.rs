//! uemacs-hl - multi-pass highlighting for a uEmacs.rs style viewer
//!
//! Highlighters reshape and color a [`display_buffer::DisplayBuffer`] in
//! three passes (wrap, move, colorize). They are arranged in a tree of
//! [`group::HighlighterGroup`]s, addressed by `/` separated paths, and built
//! from textual parameters through a [`registry::HighlighterRegistry`].

pub mod buffer;
pub mod completion;
pub mod config;
pub mod context;
pub mod coord;
pub mod display;
pub mod display_buffer;
pub mod error;
pub mod group;
pub mod highlighter;
pub mod highlighters;
pub mod params;
pub mod pass;
pub mod registry;
pub mod style;
pub mod terminal;
pub mod viewer;
pub mod window;

pub use error::{HighlightError, Result};
pub use group::HighlighterGroup;
pub use highlighter::{Highlighter, HighlighterAndId, LayoutRequest, RenderContext};
pub use pass::HighlightPass;
pub use registry::HighlighterRegistry;
