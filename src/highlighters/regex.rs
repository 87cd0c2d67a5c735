//! Regex highlighter - faces over regex captures

use regex::Regex;

use crate::coord::{BufferCoord, BufferRange};
use crate::display_buffer::DisplayBuffer;
use crate::error::{HighlightError, Result};
use crate::highlighter::{Highlighter, HighlighterAndId, RenderContext};
use crate::params::ParametersParser;
use crate::pass::HighlightPass;
use crate::style::Style;

/// Applies a face to each configured capture group of every match
///
/// Matches never span lines; the regex runs on each displayed line.
pub struct RegexHighlighter {
    regex: Regex,
    /// (capture index, style), applied in order
    faces: Vec<(usize, Style)>,
}

impl RegexHighlighter {
    pub fn new(regex: Regex, faces: Vec<(usize, Style)>) -> Self {
        Self { regex, faces }
    }
}

impl Highlighter for RegexHighlighter {
    fn passes(&self) -> HighlightPass {
        HighlightPass::COLORIZE
    }

    fn do_render(&mut self, ctx: RenderContext<'_>, display_buffer: &mut DisplayBuffer, range: BufferRange) {
        let buffer = ctx.context.buffer();
        let last_line = range.end.line.min(buffer.line_count().saturating_sub(1));

        for line in range.begin.line..=last_line {
            let Some(text) = buffer.line(line) else {
                continue;
            };
            for captures in self.regex.captures_iter(text) {
                for &(index, style) in &self.faces {
                    if let Some(m) = captures.get(index) {
                        if m.is_empty() {
                            continue;
                        }
                        display_buffer.apply_style(
                            BufferRange::new(
                                BufferCoord::new(line, m.start()),
                                BufferCoord::new(line, m.end()),
                            ),
                            style,
                        );
                    }
                }
            }
        }
    }
}

/// Parse a `<capture>:<face>` parameter
fn parse_capture_face(param: &str, capture_count: usize) -> Result<(usize, Style)> {
    let (capture, face) = param.split_once(':').ok_or_else(|| {
        HighlightError::bad_params(format!("expected <capture>:<face>, got '{}'", param))
    })?;
    let index = capture
        .parse::<usize>()
        .map_err(|_| HighlightError::bad_params(format!("invalid capture index: '{}'", capture)))?;
    if index >= capture_count {
        return Err(HighlightError::bad_params(format!(
            "capture {} does not exist in regex",
            index
        )));
    }
    Ok((index, Style::parse(face)?))
}

pub fn create(params: &[String]) -> Result<HighlighterAndId> {
    let parser = ParametersParser::new(params, &[], 2, None)?;
    let pattern = parser.positional()[0];
    let regex = Regex::new(pattern)
        .map_err(|e| HighlightError::bad_params(format!("invalid regex '{}': {}", pattern, e)))?;

    let faces = parser.positional()[1..]
        .iter()
        .map(|param| parse_capture_face(param, regex.captures_len()))
        .collect::<Result<Vec<_>>>()?;

    // Ids are path segments, so slashes in the pattern are spelled out
    let id = format!("regex_{}", pattern.replace('/', "<slash>"));
    Ok((id, Box::new(RegexHighlighter::new(regex, faces))))
}
