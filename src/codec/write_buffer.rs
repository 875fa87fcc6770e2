//! Growable scratch buffer for the encoder, with a stack of marks.
//!
//! A mark records a byte offset; pushing one lets a recursive `encode` call
//! write past the current position, copy its slice back out, and rewind, so
//! one buffer allocation is shared across arbitrarily deep struct nesting.

/// Buffer capacity grows in multiples of this many bytes per overflow,
/// rather than byte-at-a-time.
const GROWTH_INCREMENT: usize = 4096;

#[derive(Debug, Default)]
pub(crate) struct WriteBuffer {
    buf: Vec<u8>,
    marks: Vec<usize>,
}

impl WriteBuffer {
    pub fn new() -> Self {
        WriteBuffer { buf: Vec::new(), marks: Vec::new() }
    }

    fn reserve_for(&mut self, additional: usize) {
        let spare = self.buf.capacity() - self.buf.len();
        if additional > spare {
            let deficit = additional - spare;
            let grow = deficit.div_ceil(GROWTH_INCREMENT) * GROWTH_INCREMENT;
            self.buf.reserve(grow);
        }
    }

    pub fn write_byte(&mut self, b: u8) {
        self.reserve_for(1);
        self.buf.push(b);
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.reserve_for(bytes.len());
        self.buf.extend_from_slice(bytes);
    }

    /// Records the current write position as the start of a new record.
    pub fn push_mark(&mut self) {
        self.marks.push(self.buf.len());
    }

    /// Drops the topmost mark without touching the buffer.
    pub fn pop_mark(&mut self) {
        self.marks.pop();
    }

    /// Rewinds the write position back to the topmost mark, discarding
    /// everything written since.
    pub fn goto_last_mark(&mut self) {
        let mark = *self.marks.last().expect("goto_last_mark with no mark pushed");
        self.buf.truncate(mark);
    }

    /// Copies out everything written since the topmost mark, as a fresh,
    /// independently-owned byte vector.
    pub fn copy_from_last_mark(&self) -> Vec<u8> {
        let mark = *self.marks.last().expect("copy_from_last_mark with no mark pushed");
        self.buf[mark..].to_vec()
    }
}
