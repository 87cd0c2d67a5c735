//! Viewer state and main loop
//!
//! A read-only pager: it owns the buffer, the cursor and one window, and
//! re-renders the window through its highlighters after every key.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::buffer::{floor_char_boundary, Buffer};
use crate::coord::{BufferCoord, DisplayCoord};
use crate::display::Display;
use crate::display_buffer::{char_width, str_width};
use crate::error::Result;
use crate::terminal::Terminal;
use crate::window::Window;

/// Rows taken by the mode line and the minibuffer
const STATUS_ROWS: u16 = 2;

/// Byte offset of the char at `display_col` or the line end
fn col_to_byte(text: &str, display_col: usize) -> usize {
    let mut col = 0;
    for (idx, ch) in text.char_indices() {
        if col >= display_col {
            return idx;
        }
        col += char_width(ch);
    }
    text.len()
}

/// Cursor motion over a read-only buffer
mod motion {
    use super::*;

    pub fn right(buffer: &Buffer, cursor: BufferCoord) -> BufferCoord {
        let text = buffer.line(cursor.line).unwrap_or("");
        match text.get(cursor.column..).and_then(|rest| rest.chars().next()) {
            Some(ch) => BufferCoord::new(cursor.line, cursor.column + ch.len_utf8()),
            None if cursor.line + 1 < buffer.line_count() => BufferCoord::new(cursor.line + 1, 0),
            None => cursor,
        }
    }

    pub fn left(buffer: &Buffer, cursor: BufferCoord) -> BufferCoord {
        if cursor.column > 0 {
            let text = buffer.line(cursor.line).unwrap_or("");
            let column = floor_char_boundary(text, cursor.column.saturating_sub(1));
            BufferCoord::new(cursor.line, column)
        } else if cursor.line > 0 {
            let len = buffer.line(cursor.line - 1).map_or(0, str::len);
            BufferCoord::new(cursor.line - 1, len)
        } else {
            cursor
        }
    }

    /// Move `count` lines down (or up when `down` is false) keeping `goal_col`
    pub fn vertical(buffer: &Buffer, cursor: BufferCoord, count: usize, down: bool, goal_col: usize) -> BufferCoord {
        let last = buffer.line_count().saturating_sub(1);
        let line = if down {
            (cursor.line + count).min(last)
        } else {
            cursor.line.saturating_sub(count)
        };
        let column = col_to_byte(buffer.line(line).unwrap_or(""), goal_col);
        BufferCoord::new(line, column)
    }

    pub fn line_end(buffer: &Buffer, cursor: BufferCoord) -> BufferCoord {
        BufferCoord::new(cursor.line, buffer.line(cursor.line).map_or(0, str::len))
    }
}

/// Viewer state
pub struct Viewer {
    terminal: Terminal,
    display: Display,
    window: Window,
    buffer: Buffer,
    cursor: BufferCoord,
    /// Goal column for vertical movement
    goal_col: usize,
    running: bool,
}

impl Viewer {
    pub fn new(terminal: Terminal, buffer: Buffer, window: Window) -> Self {
        let mut viewer = Self {
            terminal,
            display: Display::new(),
            window,
            buffer,
            cursor: BufferCoord::default(),
            goal_col: 0,
            running: true,
        };
        viewer.resize();
        viewer
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.display.set_message(msg);
    }

    fn resize(&mut self) {
        let rows = self.terminal.rows().saturating_sub(STATUS_ROWS);
        let cols = self.terminal.cols();
        self.window
            .set_dimensions(DisplayCoord::new(rows as usize, cols as usize));
        self.display.force_redraw();
    }

    /// Run the main viewer loop
    pub fn run(&mut self) -> Result<()> {
        while self.running {
            self.window.update_display_buffer(&self.buffer, self.cursor);
            self.display
                .render(&mut self.terminal, &self.window, &self.buffer, self.cursor)?;

            match self.terminal.read_key()? {
                Some(key) => self.handle_key(key),
                None => self.resize(),
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.display.clear_message();

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let page = self.window.dimensions().line.saturating_sub(2).max(1);
        let buffer = &self.buffer;
        let cursor = self.cursor;

        let (new_cursor, keep_goal) = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                return;
            }
            KeyCode::Char('c') | KeyCode::Char('g') if ctrl => {
                self.running = false;
                return;
            }
            KeyCode::Right => (motion::right(buffer, cursor), false),
            KeyCode::Char('f') if ctrl => (motion::right(buffer, cursor), false),
            KeyCode::Left => (motion::left(buffer, cursor), false),
            KeyCode::Char('b') if ctrl => (motion::left(buffer, cursor), false),
            KeyCode::Down => (motion::vertical(buffer, cursor, 1, true, self.goal_col), true),
            KeyCode::Char('n') if ctrl => (motion::vertical(buffer, cursor, 1, true, self.goal_col), true),
            KeyCode::Up => (motion::vertical(buffer, cursor, 1, false, self.goal_col), true),
            KeyCode::Char('p') if ctrl => (motion::vertical(buffer, cursor, 1, false, self.goal_col), true),
            KeyCode::PageDown => (motion::vertical(buffer, cursor, page, true, self.goal_col), true),
            KeyCode::Char('v') if ctrl => (motion::vertical(buffer, cursor, page, true, self.goal_col), true),
            KeyCode::PageUp => (motion::vertical(buffer, cursor, page, false, self.goal_col), true),
            KeyCode::Home => (BufferCoord::new(cursor.line, 0), false),
            KeyCode::Char('a') if ctrl => (BufferCoord::new(cursor.line, 0), false),
            KeyCode::End => (motion::line_end(buffer, cursor), false),
            KeyCode::Char('e') if ctrl => (motion::line_end(buffer, cursor), false),
            KeyCode::Char('l') if ctrl => {
                self.display.force_redraw();
                return;
            }
            _ => return,
        };

        self.cursor = new_cursor;
        if !keep_goal {
            let text = self.buffer.line(new_cursor.line).unwrap_or("");
            self.goal_col = str_width(&text[..floor_char_boundary(text, new_cursor.column)]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_motion() {
        let buffer = Buffer::from_text("test", "aé\nb");
        let mut cursor = BufferCoord::default();
        cursor = motion::right(&buffer, cursor);
        assert_eq!(cursor, BufferCoord::new(0, 1));
        cursor = motion::right(&buffer, cursor);
        assert_eq!(cursor, BufferCoord::new(0, 3));
        cursor = motion::right(&buffer, cursor);
        assert_eq!(cursor, BufferCoord::new(1, 0));

        cursor = motion::left(&buffer, cursor);
        assert_eq!(cursor, BufferCoord::new(0, 3));
        cursor = motion::left(&buffer, cursor);
        assert_eq!(cursor, BufferCoord::new(0, 1));
        assert_eq!(motion::left(&buffer, BufferCoord::default()), BufferCoord::default());
    }

    #[test]
    fn test_vertical_motion_keeps_goal() {
        let buffer = Buffer::from_text("test", "abcdef\nab\nabcdef");
        let cursor = motion::vertical(&buffer, BufferCoord::new(0, 4), 1, true, 4);
        assert_eq!(cursor, BufferCoord::new(1, 2));
        let cursor = motion::vertical(&buffer, cursor, 1, true, 4);
        assert_eq!(cursor, BufferCoord::new(2, 4));
        let cursor = motion::vertical(&buffer, cursor, 10, true, 4);
        assert_eq!(cursor.line, 2);
        let cursor = motion::vertical(&buffer, cursor, 10, false, 0);
        assert_eq!(cursor, BufferCoord::new(0, 0));
    }

    #[test]
    fn test_col_to_byte() {
        assert_eq!(col_to_byte("你好", 2), 3);
        assert_eq!(col_to_byte("abc", 10), 3);
        assert_eq!(col_to_byte("abc", 0), 0);
    }
}
