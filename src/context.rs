//! Editing context handed to highlighters

use crate::buffer::Buffer;
use crate::coord::{BufferCoord, DisplayCoord};

/// Read-only view of the editor state a frame is rendered for
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    buffer: &'a Buffer,
    cursor: BufferCoord,
    /// Window size in rows and columns
    dimensions: DisplayCoord,
}

impl<'a> Context<'a> {
    pub fn new(buffer: &'a Buffer, cursor: BufferCoord, dimensions: DisplayCoord) -> Self {
        Self {
            buffer,
            cursor,
            dimensions,
        }
    }

    pub fn buffer(&self) -> &'a Buffer {
        self.buffer
    }

    pub fn cursor(&self) -> BufferCoord {
        self.cursor
    }

    pub fn dimensions(&self) -> DisplayCoord {
        self.dimensions
    }
}
