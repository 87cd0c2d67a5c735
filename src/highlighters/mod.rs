//! Built-in highlighters
//!
//! Each highlighter type provides a factory building it from raw
//! parameters; [`register_builtins`] adds them all to a registry.

mod cursor;
mod fill;
mod line;
mod number_lines;
mod regex;
mod scroll_margin;
mod wrap;

pub use cursor::CursorHighlighter;
pub use fill::FillHighlighter;
pub use line::LineHighlighter;
pub use number_lines::NumberLinesHighlighter;
pub use self::regex::RegexHighlighter;
pub use scroll_margin::ScrollMarginHighlighter;
pub use wrap::WrapHighlighter;

use crate::error::Result;
use crate::group::HighlighterGroup;
use crate::highlighter::HighlighterAndId;
use crate::params::{ParametersParser, SwitchDesc};
use crate::pass::HighlightPass;
use crate::registry::HighlighterRegistry;

/// Register every built-in highlighter type
pub fn register_builtins(registry: &mut HighlighterRegistry) {
    registry.register(
        "group",
        create_group,
        "group <id> [-passes <passes>]: highlighter group containing other highlighters\n\
         passes is a '|' separated list of wrap, move and colorize (default all)",
    );
    registry.register("fill", fill::create, "fill <face>: fill the whole displayed text with face");
    registry.register(
        "regex",
        self::regex::create,
        "regex <regex> <capture>:<face>...: highlight the captures of every match of regex\n\
         capture 0 is the whole match",
    );
    registry.register("line", line::create, "line <line> <face>: highlight a whole buffer line (1-based)");
    registry.register(
        "number-lines",
        number_lines::create,
        "number-lines [-relative] [-hlcursor] [-separator <text>]: display line numbers\n\
         -relative: show line numbers relative to the cursor line\n\
         -hlcursor: highlight the cursor line number\n\
         -separator: text displayed between the numbers and the buffer text",
    );
    registry.register(
        "wrap",
        wrap::create,
        "wrap [-width <columns>] [-marker <text>]: wrap lines to the window or to the given width\n\
         -marker: text prepended to every continuation line",
    );
    registry.register(
        "scroll-margin",
        scroll_margin::create,
        "scroll-margin <lines>[,<columns>]: keep that many lines and columns visible around the cursor",
    );
    registry.register("cursor", cursor::create, "cursor [<face>]: highlight the character under the cursor");
}

const GROUP_SWITCHES: [SwitchDesc; 1] = [SwitchDesc::with_arg("passes")];

fn create_group(params: &[String]) -> Result<HighlighterAndId> {
    let parser = ParametersParser::new(params, &GROUP_SWITCHES, 1, Some(1))?;
    let passes = match parser.get("passes") {
        Some(passes) => HighlightPass::parse(passes)?,
        None => HighlightPass::ALL,
    };
    Ok((parser.positional()[0].to_string(), Box::new(HighlighterGroup::new(passes))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HighlightError;

    fn params(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_create_group() {
        let (id, group) = create_group(&params(&["-passes", "wrap|move", "layout"])).unwrap();
        assert_eq!(id, "layout");
        assert!(group.has_children());
        assert_eq!(group.passes(), HighlightPass::WRAP | HighlightPass::MOVE);

        let (_, group) = create_group(&params(&["code"])).unwrap();
        assert_eq!(group.passes(), HighlightPass::ALL);
    }

    #[test]
    fn test_create_group_bad_params() {
        assert!(matches!(create_group(&[]), Err(HighlightError::BadParameters(_))));
        assert!(matches!(
            create_group(&params(&["-passes", "paint", "g"])),
            Err(HighlightError::BadParameters(_))
        ));
    }
}
