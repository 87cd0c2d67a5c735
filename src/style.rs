//! Style types for display atoms
//!
//! Highlighters describe styles as faces: `fg[,bg][+attrs]`, for example
//! `red`, `black,yellow` or `blue+bu`. Attribute letters are `b` (bold),
//! `i` (italic), `u` (underline), `r` (reverse) and `d` (dim).

use crate::error::{HighlightError, Result};

/// Terminal colors (ANSI 16-color palette for compatibility)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    Rgb(u8, u8, u8),
}

impl Color {
    /// Parse a color name, or `rgb:RRGGBB`
    pub fn from_name(name: &str) -> Option<Self> {
        let color = match name {
            "default" => Color::Default,
            "black" => Color::Black,
            "red" => Color::Red,
            "green" => Color::Green,
            "yellow" => Color::Yellow,
            "blue" => Color::Blue,
            "magenta" => Color::Magenta,
            "cyan" => Color::Cyan,
            "white" => Color::White,
            "bright-black" => Color::BrightBlack,
            "bright-red" => Color::BrightRed,
            "bright-green" => Color::BrightGreen,
            "bright-yellow" => Color::BrightYellow,
            "bright-blue" => Color::BrightBlue,
            "bright-magenta" => Color::BrightMagenta,
            "bright-cyan" => Color::BrightCyan,
            "bright-white" => Color::BrightWhite,
            _ => {
                let hex = name.strip_prefix("rgb:")?;
                if hex.len() != 6 || !hex.is_ascii() {
                    return None;
                }
                let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
                return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
            }
        };
        Some(color)
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    /// Reverse video (swap fg/bg)
    pub reverse: bool,
    /// Faint text (gutters, markers)
    pub dim: bool,
}

impl Style {
    /// Create a style with just foreground color
    pub fn fg(color: Color) -> Self {
        Self {
            fg: color,
            ..Default::default()
        }
    }

    /// Create a reverse video style (for the cursor)
    pub fn reverse() -> Self {
        Self {
            reverse: true,
            ..Default::default()
        }
    }

    /// Builder: set background color
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Builder: set bold
    pub fn with_bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Builder: set dim
    pub fn with_dim(mut self) -> Self {
        self.dim = true;
        self
    }

    /// Check if this is the default (no styling)
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Layer `other` over this style
    ///
    /// Non-default colors of `other` win; attributes accumulate.
    pub fn merge(self, other: Style) -> Style {
        Style {
            fg: if other.fg == Color::Default { self.fg } else { other.fg },
            bg: if other.bg == Color::Default { self.bg } else { other.bg },
            bold: self.bold || other.bold,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
            reverse: self.reverse || other.reverse,
            dim: self.dim || other.dim,
        }
    }

    /// Parse a face description: `fg[,bg][+attrs]`
    pub fn parse(face: &str) -> Result<Style> {
        let bad_face = || HighlightError::bad_params(format!("invalid face: '{}'", face));

        let (colors, attrs) = match face.split_once('+') {
            Some((colors, attrs)) => (colors, attrs),
            None => (face, ""),
        };

        let mut style = Style::default();
        if !colors.is_empty() {
            let (fg, bg) = match colors.split_once(',') {
                Some((fg, bg)) => (fg, Some(bg)),
                None => (colors, None),
            };
            if !fg.is_empty() {
                style.fg = Color::from_name(fg).ok_or_else(bad_face)?;
            }
            if let Some(bg) = bg {
                style.bg = Color::from_name(bg).ok_or_else(bad_face)?;
            }
        }

        for attr in attrs.chars() {
            match attr {
                'b' => style.bold = true,
                'i' => style.italic = true,
                'u' => style.underline = true,
                'r' => style.reverse = true,
                'd' => style.dim = true,
                _ => return Err(bad_face()),
            }
        }

        Ok(style)
    }
}
