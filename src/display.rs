//! Display rendering
//!
//! Paints the display buffer a window produced, followed by the mode line
//! and the message line.

use crate::buffer::Buffer;
use crate::coord::BufferCoord;
use crate::display_buffer::{char_width, DisplayLine};
use crate::error::Result;
use crate::style::Style;
use crate::terminal::Terminal;
use crate::window::Window;

/// Display state
pub struct Display {
    /// Whether a full redraw is needed
    needs_redraw: bool,
    /// Message to show in minibuffer (bottom line)
    message: Option<String>,
}

impl Display {
    pub fn new() -> Self {
        Self {
            needs_redraw: true,
            message: None,
        }
    }

    /// Mark that a full redraw is needed
    pub fn force_redraw(&mut self) {
        self.needs_redraw = true;
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Paint the window's last display buffer and position the cursor
    pub fn render(&mut self, terminal: &mut Terminal, window: &Window, buffer: &Buffer, cursor: BufferCoord) -> Result<()> {
        let cols = terminal.cols() as usize;
        let rows = terminal.rows();

        if self.needs_redraw {
            terminal.clear_screen()?;
        }

        let height = window.dimensions().line;
        let lines = window.display_buffer().lines();
        for row in 0..height {
            terminal.move_cursor(row as u16, 0)?;
            match lines.get(row) {
                Some(line) => self.render_line(terminal, line, buffer, cols)?,
                None => {
                    // Empty line indicator (like vim's ~)
                    terminal.apply_style(&Style::default().with_dim())?;
                    terminal.write_str("~")?;
                    terminal.reset_attributes()?;
                }
            }
            terminal.clear_to_eol()?;
        }

        self.render_mode_line(terminal, buffer, cursor, height as u16, cols)?;
        self.render_minibuffer(terminal, rows.saturating_sub(1), cols)?;

        match window.display_position(buffer, cursor) {
            Some(pos) => {
                let col = pos.column.min(cols.saturating_sub(1));
                terminal.move_cursor(pos.line as u16, col as u16)?;
                terminal.set_cursor_visible(true)?;
            }
            None => terminal.set_cursor_visible(false)?,
        }
        terminal.flush()?;

        self.needs_redraw = false;
        Ok(())
    }

    /// Paint the atoms of one display line, each in its own style
    fn render_line(&self, terminal: &mut Terminal, line: &DisplayLine, buffer: &Buffer, cols: usize) -> Result<()> {
        let mut used = 0;
        for atom in line.atoms() {
            if used >= cols {
                break;
            }
            let text = truncate_to_width(atom.text_in(buffer), cols - used);
            used += text.chars().map(char_width).sum::<usize>();
            terminal.apply_style(&atom.style)?;
            terminal.write_str(&text)?;
        }
        terminal.reset_attributes()?;
        Ok(())
    }

    fn render_mode_line(
        &self,
        terminal: &mut Terminal,
        buffer: &Buffer,
        cursor: BufferCoord,
        row: u16,
        cols: usize,
    ) -> Result<()> {
        terminal.move_cursor(row, 0)?;
        terminal.apply_style(&Style::reverse())?;

        let filename = buffer
            .filename()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Calculate position percentage
        let line_count = buffer.line_count();
        let cursor_line = cursor.line + 1;
        let percent = if line_count <= 1 {
            "All".to_string()
        } else if cursor_line == 1 {
            "Top".to_string()
        } else if cursor_line >= line_count {
            "Bot".to_string()
        } else {
            format!("{}%", cursor_line * 100 / line_count)
        };

        // Format: -- uemacs-hl: buffername (filename) L1:1 percent --
        let mode_line = format!(
            "-- uemacs-hl: {} ({}) L{}:{} {} ",
            buffer.name(),
            if filename.is_empty() { "no file" } else { &filename },
            cursor_line,
            cursor.column + 1,
            percent,
        );

        // Pad or truncate to fill width
        let padded = if mode_line.len() < cols {
            format!("{}{}", mode_line, "-".repeat(cols - mode_line.len()))
        } else {
            truncate_to_width(&mode_line, cols)
        };

        terminal.write_str(&padded)?;
        terminal.reset_attributes()?;
        Ok(())
    }

    /// Render the minibuffer (message area)
    fn render_minibuffer(&self, terminal: &mut Terminal, row: u16, cols: usize) -> Result<()> {
        terminal.move_cursor(row, 0)?;

        if let Some(ref msg) = self.message {
            let truncated = truncate_to_width(msg, cols);
            terminal.write_str(&truncated)?;
        }

        terminal.clear_to_eol()?;
        Ok(())
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

/// Truncate a string to fit within a display width
fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut width = 0;

    for ch in s.chars() {
        let ch_width = char_width(ch);
        if width + ch_width > max_width {
            break;
        }
        result.push(ch);
        width += ch_width;
    }

    result
}
