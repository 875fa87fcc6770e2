//! Growable scratch buffer for the decoder, with a stack of layers.
//!
//! Each nested decode pushes its payload as a new layer, scoping
//! `remaining()` to exactly that payload so the inner read loop can't read
//! past it into whatever comes after in the outer stream. Popping restores
//! the outer layer's read position.

use crate::error::{CodecError, Result};

#[derive(Debug, Default)]
pub(crate) struct ReadBuffer {
    buf: Vec<u8>,
    pos: usize,
    end: usize,
    saved: Vec<(usize, usize, usize)>,
}

impl ReadBuffer {
    pub fn new() -> Self {
        ReadBuffer { buf: Vec::new(), pos: 0, end: 0, saved: Vec::new() }
    }

    /// Appends `bytes` to the backing storage and scopes the active layer to
    /// exactly that slice, saving the prior layer's start, position and end
    /// to restore on `pop_bytes`.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        let start = self.buf.len();
        self.saved.push((start, self.pos, self.end));
        self.buf.extend_from_slice(bytes);
        self.pos = start;
        self.end = start + bytes.len();
    }

    /// Restores the position and end of the layer that was active before
    /// the most recent `push_bytes`, and truncates the backing storage back
    /// to the offset it had before that push, same as `WriteBuffer::
    /// goto_last_mark` does for the write side. Without this the buffer
    /// grows without bound across repeated top-level decodes on a reused
    /// `Codec`.
    pub fn pop_bytes(&mut self) {
        let (start, pos, end) = self.saved.pop().expect("pop_bytes with no layer pushed");
        self.buf.truncate(start);
        self.pos = pos;
        self.end = end;
    }

    pub fn remaining(&self) -> usize {
        self.end - self.pos
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        self.require(1)?;
        let b = self.buf[self.pos];
        self.pos += 1;
        Ok(b)
    }

    pub fn read_u16_be(&mut self) -> Result<u16> {
        let bytes = self.read_exact(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Reads exactly `len` bytes out as a fresh, independently-owned slice.
    pub fn read_exact(&mut self, len: usize) -> Result<Vec<u8>> {
        self.require(len)?;
        let bytes = self.buf[self.pos..self.pos + len].to_vec();
        self.pos += len;
        Ok(bytes)
    }

    fn require(&self, needed: usize) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            Err(CodecError::TruncatedInput { needed, available })
        } else {
            Ok(())
        }
    }
}
