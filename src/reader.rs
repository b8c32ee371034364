use std::{io, str};

use encoding_rs::CoderResult;

use super::{bom, util::DebuggableDecoder, util::TinyBuf, EncodingHint};

/// A reader wrapper that presents UTF-8, UTF-16LE, or UTF-16BE input as UTF-8.
///
/// This wrapper examines the first bytes of the underlying reader for a byte-order mark.
/// A BOM, when found, names the encoding of the stream and is stripped from the output,
/// regardless of the hint the reader was created with; without one, the stream is decoded
/// as the hint declares. The decoded bytes are accessed through [`std::io::Read`] methods.
///
/// Decoding proceeds incrementally and never fails on malformed input: invalid byte
/// sequences, unpaired surrogates, and a partial code unit at the end of the stream are
/// replaced with U+FFFD. The only errors this reader returns are those of the underlying
/// reader.
///
/// The byte sequence read from this reader is generally valid UTF-8, but that is _not_
/// always so when the output buffer is less than four bytes in length, in order not to
/// return `Ok(0)` by filling the buffer with a character fragment. Once this reader
/// reaches the end of the stream, the byte sequence read so far, as a whole from the
/// beginning, is guaranteed to be valid UTF-8.
///
/// The first end of input reported by the underlying reader is treated as the end of the
/// stream: any pending partial sequence is flushed as U+FFFD, and subsequent reads return
/// `Ok(0)`.
///
/// # Examples
///
/// ```rust
/// use std::io::Read as _;
///
/// use anyutf::{EncodingHint, UtfReader};
///
/// // UTF-16BE with a BOM; the BOM wins over the UTF-8 hint
/// let src: &[u8] = &[254, 255, 216, 61, 222, 2, 216, 61, 220, 123];
/// let mut reader = UtfReader::new(src, EncodingHint::Utf8);
///
/// let mut dst = String::new();
/// reader.read_to_string(&mut dst)?;
/// assert_eq!(dst, "😂👻");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct UtfReader<R> {
    inner: R,
    hint: EncodingHint,
    /// Selected once the stream head has been examined for a BOM.
    decoder: Option<DebuggableDecoder>,
    /// Sniffed leading bytes that were not a BOM, replayed to the decoder ahead of
    /// `inner`.
    carry: TinyBuf,
    /// Decoded bytes held back when the caller's buffer is too small for the decoder to
    /// write a whole character.
    fallback_buf: TinyBuf,
    /// Set once the decoder has been flushed at the end of the stream.
    finished: bool,
}

impl<R: io::BufRead> UtfReader<R> {
    /// Creates a new decoding reader over a buffered reader, assuming `hint` for BOM-less
    /// input.
    pub fn new(inner: R, hint: EncodingHint) -> Self {
        Self {
            inner,
            hint,
            decoder: None,
            carry: Default::default(),
            fallback_buf: Default::default(),
            finished: false,
        }
    }

    /// Returns the hint this reader was created with.
    pub fn hint(&self) -> EncodingHint {
        self.hint
    }

    /// Returns a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Unwraps this reader, returning the underlying reader.
    ///
    /// Sniffed bytes and undelivered decoded bytes held inside this reader are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Pulls the stream head, resolves the encoding, and instantiates the decoder.
    ///
    /// Reads until [`bom::MAX_BOM_LEN`] bytes are available or the stream ends, so a BOM
    /// split across reads of the underlying reader is still recognized. Leading bytes
    /// that were not part of a BOM are queued for the decoder.
    fn sniff(&mut self) -> io::Result<()> {
        debug_assert!(self.decoder.is_none());
        let mut prefix = [0; bom::MAX_BOM_LEN];
        let mut len = 0;
        while len < prefix.len() {
            match self.inner.read(&mut prefix[len..]) {
                Ok(0) => break,
                Ok(n) => len += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        let (encoding, bom_len) = bom::resolve(&prefix[..len], self.hint);
        self.carry.extend_from_slice(&prefix[bom_len..len]);
        self.decoder = Some(encoding.new_decoder_without_bom_handling().into());
        Ok(())
    }

    fn read_inner(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        debug_assert!(!buf.is_empty());
        debug_assert!(self.fallback_buf.is_empty());
        debug_assert!(!self.finished);
        let Some(decoder) = self.decoder.as_mut() else {
            debug_assert!(false, "unreachable");
            return Err(io::Error::new(
                io::ErrorKind::Other,
                "failed to initialize decoder unexpectedly",
            ));
        };

        loop {
            let from_carry = !self.carry.is_empty();
            let src = if from_carry {
                self.carry.as_slice()
            } else {
                self.inner.fill_buf()?
            };
            let last = !from_carry && src.is_empty();

            let (result, consumed, written) = if buf.len() > self.fallback_buf.unfilled().len() {
                let (result, consumed, written, _) = decoder.decode_to_utf8(src, buf, last);
                (result, consumed, written)
            } else {
                // use fallback buffer if `buf` may be too small to call decoder method
                let (result, consumed, mut written, _) =
                    decoder.decode_to_utf8(src, self.fallback_buf.unfilled(), last);
                if written > 0 {
                    self.fallback_buf.advance(written);
                    written = self.fallback_buf.drain_into(buf);
                }
                (result, consumed, written)
            };

            if from_carry {
                self.carry.pop_front(consumed);
            } else {
                self.inner.consume(consumed);
            }
            if last && matches!(result, CoderResult::InputEmpty) {
                self.finished = true;
            }
            if written > 0 || self.finished {
                debug_assert!(Self::utf8_guarantee_holds(
                    &buf[..written],
                    self.fallback_buf.as_slice()
                ));
                return Ok(written);
            }
            // no output yet: the decoder swallowed a partial sequence; feed it more
        }
    }

    /// Asserts the UTF-8 guarantee of this reader: the byte sequence just written,
    /// followed by any fallback buffer content left behind, is a valid UTF-8 sequence.
    fn utf8_guarantee_holds(buf_written: &[u8], pending: &[u8]) -> bool {
        if pending.is_empty() {
            str::from_utf8(buf_written).is_ok()
        } else {
            let mut v = Vec::with_capacity(buf_written.len() + pending.len());
            v.extend(buf_written);
            v.extend(pending);
            str::from_utf8(&v).is_ok()
        }
    }

    /// Returns `true` if the bytes returned by this reader so far, as a whole, is a valid
    /// UTF-8 sequence.
    fn has_read_valid_utf8(&self) -> bool {
        // true if fallback buffer is empty or previous call happened to read up to char
        // boundary
        self.fallback_buf.is_empty() || str::from_utf8(self.fallback_buf.as_slice()).is_ok()
    }
}

impl<R: io::BufRead> io::Read for UtfReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        // ensure preconditions
        if buf.is_empty() {
            // `io::Read` may return `Ok(0)` if output buffer is 0 bytes in length
            return Ok(0);
        } else if !self.fallback_buf.is_empty() {
            // flush internal buffer if it contains leftovers from previous call; return
            // early to keep this cold path simple even if `buf` has remaining space
            return Ok(self.fallback_buf.drain_into(buf));
        } else if self.finished {
            // the decoder has accepted the end of the stream and must not be fed again
            return Ok(0);
        }
        if self.decoder.is_none() {
            self.sniff()?;
        }
        self.read_inner(buf)
    }

    fn read_to_string(&mut self, buf: &mut String) -> io::Result<usize> {
        // This method skips the UTF-8 validation of the output based on `Decoder`'s
        // guarantee. It delegates to the default `read_to_end` while using `PanicGuard`
        // to make sure that `Vec`'s `len` is reset to a place up to which UTF-8 validity
        // is confirmed.
        struct PanicGuard<'a> {
            len: usize,
            inner: &'a mut Vec<u8>,
        }

        impl Drop for PanicGuard<'_> {
            fn drop(&mut self) {
                unsafe {
                    self.inner.set_len(self.len);
                }
            }
        }

        let mut g = PanicGuard {
            len: buf.len(),
            inner: unsafe { buf.as_mut_vec() },
        };

        let ret = self.read_to_end(g.inner);
        if self.has_read_valid_utf8() {
            g.len = g.inner.len();
            ret
        } else {
            ret?;
            debug_assert!(false, "unreachable");
            Err(io::Error::new(
                io::ErrorKind::Other,
                "failed to read to string unexpectedly",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read as _;

    use super::{EncodingHint, UtfReader};

    /// Tests that a partial code unit at the end of the stream is flushed as U+FFFD
    /// rather than reported as an error or silently dropped.
    #[test]
    fn trailing_partial_sequence() {
        // "hi" in UTF-16LE followed by half of a third code unit
        let src: &[u8] = &[b'h', 0, b'i', 0, 0x42];
        let mut reader = UtfReader::new(src, EncodingHint::Utf16Le);
        let mut dst = String::new();
        assert!(matches!(reader.read_to_string(&mut dst), Ok(5)));
        assert_eq!(dst, "hi\u{FFFD}");

        // reads after the end keep reporting it
        assert!(matches!(reader.read(&mut [0; 64]), Ok(0)));
        assert!(matches!(reader.read_to_string(&mut dst), Ok(0)));
        assert_eq!(dst, "hi\u{FFFD}");
    }

    /// Tests output buffers too small to hold one decoded character.
    #[test]
    fn sub_character_output_buffer() {
        let src: &[u8] = "日本語".as_bytes();
        let mut reader = UtfReader::new(src, EncodingHint::Utf8);
        let mut dst = Vec::new();
        let mut buf = [0u8; 1];
        loop {
            match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => dst.extend(&buf[..n]),
                ret => panic!("assertion failed: {:?}", ret),
            }
        }
        assert_eq!(String::from_utf8(dst).unwrap(), "日本語");
    }

    /// Tests that an empty stream decodes to nothing under every hint.
    #[test]
    fn empty_stream() {
        for hint in [
            EncodingHint::Utf8,
            EncodingHint::Utf16Le,
            EncodingHint::Utf16Be,
        ] {
            let src: &[u8] = &[];
            let mut reader = UtfReader::new(src, hint);
            let mut dst = String::new();
            assert!(matches!(reader.read_to_string(&mut dst), Ok(0)));
            assert_eq!(dst, "");
        }
    }

    /// Tests that a stream holding nothing but a BOM decodes to an empty document.
    #[test]
    fn bom_only_stream() {
        for src in [&[0xEF_u8, 0xBB, 0xBF][..], &[0xFF, 0xFE][..], &[0xFE, 0xFF][..]] {
            let mut reader = UtfReader::new(src, EncodingHint::Utf8);
            let mut dst = String::new();
            assert!(matches!(reader.read_to_string(&mut dst), Ok(0)));
            assert_eq!(dst, "");
        }
    }
}
