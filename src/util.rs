use std::{fmt, ops};

use encoding_rs::Decoder;

/// A fixed-capacity byte queue backed by a stack-allocated array.
///
/// Backs the two tiny staging areas of the reader: the sniffed leading bytes waiting to
/// be replayed to the decoder, and decoded bytes held back when the caller's output
/// buffer is too small for the decoder to write a whole character.
#[derive(Debug, Default)]
pub(crate) struct TinyBuf {
    start: u8,
    end: u8,
    buf: [u8; 8],
}

impl TinyBuf {
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[usize::from(self.start)..usize::from(self.end)]
    }

    /// Returns the writable spare room at the back of the queue, reclaiming the space of
    /// already-drained bytes first when the queue is empty.
    pub fn unfilled(&mut self) -> &mut [u8] {
        if self.start == self.end {
            self.start = 0;
            self.end = 0;
        }
        &mut self.buf[usize::from(self.end)..]
    }

    /// Marks `n` bytes of [`unfilled`](Self::unfilled) as written.
    pub fn advance(&mut self, n: usize) {
        debug_assert!(usize::from(self.end) + n <= self.buf.len());
        self.end = (usize::from(self.end) + n).min(self.buf.len()) as u8;
    }

    /// Discards `n` bytes from the front of the queue.
    pub fn pop_front(&mut self, n: usize) {
        debug_assert!(n <= self.as_slice().len());
        self.start = (usize::from(self.start) + n).min(usize::from(self.end)) as u8;
    }

    /// Moves up to `buf.len()` bytes out of the front of the queue, returning the count.
    pub fn drain_into(&mut self, buf: &mut [u8]) -> usize {
        let n = self.as_slice().len().min(buf.len());
        buf[..n].copy_from_slice(&self.as_slice()[..n]);
        self.pop_front(n);
        n
    }

    /// Copies as much of `src` as fits into the spare room, returning the bytes taken.
    pub fn extend_from_slice(&mut self, src: &[u8]) -> usize {
        let n = self.unfilled().len().min(src.len());
        self.unfilled()[..n].copy_from_slice(&src[..n]);
        self.advance(n);
        n
    }
}

/// Implements `Debug` for `encoding_rs::Decoder`, which does not do so itself.
pub(crate) struct DebuggableDecoder(Decoder);

impl fmt::Debug for DebuggableDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decoder")
            .field("encoding()", self.encoding())
            .finish()
    }
}

impl From<Decoder> for DebuggableDecoder {
    fn from(value: Decoder) -> Self {
        Self(value)
    }
}

impl ops::Deref for DebuggableDecoder {
    type Target = Decoder;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ops::DerefMut for DebuggableDecoder {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
