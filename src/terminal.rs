//! Terminal abstraction using crossterm

use std::io::{self, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyEvent},
    execute, queue,
    style::{self as term_style, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::error::Result;
use crate::style::{Color, Style};

/// Map a display color to the crossterm palette
fn to_crossterm(color: Color) -> term_style::Color {
    match color {
        Color::Default => term_style::Color::Reset,
        Color::Black => term_style::Color::Black,
        Color::Red => term_style::Color::DarkRed,
        Color::Green => term_style::Color::DarkGreen,
        Color::Yellow => term_style::Color::DarkYellow,
        Color::Blue => term_style::Color::DarkBlue,
        Color::Magenta => term_style::Color::DarkMagenta,
        Color::Cyan => term_style::Color::DarkCyan,
        Color::White => term_style::Color::Grey,
        Color::BrightBlack => term_style::Color::DarkGrey,
        Color::BrightRed => term_style::Color::Red,
        Color::BrightGreen => term_style::Color::Green,
        Color::BrightYellow => term_style::Color::Yellow,
        Color::BrightBlue => term_style::Color::Blue,
        Color::BrightMagenta => term_style::Color::Magenta,
        Color::BrightCyan => term_style::Color::Cyan,
        Color::BrightWhite => term_style::Color::White,
        Color::Rgb(r, g, b) => term_style::Color::Rgb { r, g, b },
    }
}

/// Terminal wrapper for cross-platform terminal I/O
pub struct Terminal {
    /// Terminal width in columns
    cols: u16,
    /// Terminal height in rows
    rows: u16,
}

impl Terminal {
    /// Create a new terminal instance and enter raw mode
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let (cols, rows) = terminal::size()?;

        let mut term = Self { cols, rows };
        term.enter_alternate_screen()?;
        term.hide_cursor()?;

        Ok(term)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        execute!(io::stdout(), terminal::EnterAlternateScreen)?;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        execute!(io::stdout(), cursor::Hide)?;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        execute!(io::stdout(), cursor::Show)?;
        Ok(())
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn clear_screen(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::All))?;
        Ok(())
    }

    /// Clear from cursor to end of line
    pub fn clear_to_eol(&mut self) -> Result<()> {
        queue!(io::stdout(), terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    /// Move cursor to position (0-indexed)
    pub fn move_cursor(&mut self, row: u16, col: u16) -> Result<()> {
        queue!(io::stdout(), cursor::MoveTo(col, row))?;
        Ok(())
    }

    /// Write a string at current cursor position
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        queue!(io::stdout(), Print(s))?;
        Ok(())
    }

    /// Flush output buffer to terminal
    pub fn flush(&mut self) -> Result<()> {
        io::stdout().flush()?;
        Ok(())
    }

    pub fn set_cursor_visible(&mut self, visible: bool) -> Result<()> {
        if visible {
            queue!(io::stdout(), cursor::Show)?;
        } else {
            queue!(io::stdout(), cursor::Hide)?;
        }
        Ok(())
    }

    /// Read a key event (blocking)
    ///
    /// Resize events update the stored size and are returned as None.
    pub fn read_key(&mut self) -> Result<Option<KeyEvent>> {
        loop {
            match event::read()? {
                Event::Key(key_event) => return Ok(Some(key_event)),
                Event::Resize(cols, rows) => {
                    self.cols = cols;
                    self.rows = rows;
                    return Ok(None);
                }
                _ => {
                    // Ignore other events (mouse, focus, etc.)
                }
            }
        }
    }

    /// Set colors and attributes for subsequent output
    pub fn apply_style(&mut self, style: &Style) -> Result<()> {
        self.reset_attributes()?;
        queue!(
            io::stdout(),
            SetForegroundColor(to_crossterm(style.fg)),
            SetBackgroundColor(to_crossterm(style.bg))
        )?;
        let attributes = [
            (style.bold, Attribute::Bold),
            (style.italic, Attribute::Italic),
            (style.underline, Attribute::Underlined),
            (style.reverse, Attribute::Reverse),
            (style.dim, Attribute::Dim),
        ];
        for (enabled, attribute) in attributes {
            if enabled {
                queue!(io::stdout(), SetAttribute(attribute))?;
            }
        }
        Ok(())
    }

    /// Reset all attributes
    pub fn reset_attributes(&mut self) -> Result<()> {
        queue!(io::stdout(), SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = self.show_cursor();
        let _ = self.leave_alternate_screen();
        let _ = terminal::disable_raw_mode();
    }
}
