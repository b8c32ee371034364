//! Encoding-agnostic text reading for std::io
//!
//! This crate reads text that may be UTF-8, UTF-16LE, or UTF-16BE, with or without a
//! byte-order mark, and presents it as UTF-8 through Rust's standard streaming API. A
//! BOM, when present, is authoritative: it names the encoding and is stripped, no matter
//! what the caller assumed. Without one, the caller's [`EncodingHint`] decides. The
//! functions here can stand in for [`std::fs::File::open`] and [`std::fs::read_to_string`]
//! when the exact UTF flavor of a file is unknown.
//!
//! ```no_run
//! use std::io::prelude::*;
//!
//! use anyutf::EncodingHint;
//!
//! // Reads UTF-8 or, say, a UTF-16LE file exported by a Windows tool, all the same.
//! let text = anyutf::read_to_string("foo.txt", EncodingHint::HTML5)?;
//!
//! for line in anyutf::lines("bar.csv", EncodingHint::WINDOWS)? {
//!     println!("{}", line?);
//! }
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! The core transform, [`UtfReader`], wraps any [`std::io::BufRead`] and decodes
//! incrementally, so arbitrarily large streams are handled without buffering them whole.
//! Malformed input never aborts a read: invalid sequences come out as U+FFFD.
//!
//! ```rust
//! use std::io::prelude::*;
//!
//! use anyutf::{EncodingHint, UtfReader};
//!
//! let src: &[u8] = &[0xFF, 0xFE, b'h', 0, b'i', 0]; // UTF-16LE with a BOM
//! let mut reader = UtfReader::new(src, EncodingHint::Utf8);
//! let mut text = String::new();
//! reader.read_to_string(&mut text)?;
//! assert_eq!(text, "hi"); // the BOM wins over the hint
//! # Ok::<(), std::io::Error>(())
//! ```

mod bom;
mod hint;
mod reader;

mod util;

pub use hint::EncodingHint;
pub use reader::UtfReader;

use std::{borrow::Cow, fs, io, io::Read as _, path::Path};

/// A [`UtfReader`] over a buffered file, as returned by [`open`].
pub type FileReader = UtfReader<io::BufReader<fs::File>>;

/// Opens the file at `path` for reading and wraps it in a [`UtfReader`].
///
/// A replacement for [`fs::File::open`] when the UTF flavor of the file is unknown. The
/// file handle is owned by the returned reader and released when it is dropped. Open
/// errors are returned unchanged.
pub fn open(path: impl AsRef<Path>, hint: EncodingHint) -> io::Result<FileReader> {
    let file = fs::File::open(path)?;
    Ok(UtfReader::new(io::BufReader::new(file), hint))
}

/// Reads the whole file at `path` into a UTF-8 string.
///
/// A replacement for [`fs::read_to_string`] when the UTF flavor of the file is unknown.
/// The file handle is released before this function returns, on success and on error
/// alike.
pub fn read_to_string(path: impl AsRef<Path>, hint: EncodingHint) -> io::Result<String> {
    let mut text = String::new();
    open(path, hint)?.read_to_string(&mut text)?;
    Ok(text)
}

/// Returns an iterator over the decoded lines of the file at `path`.
///
/// Line splitting happens after decoding, so UTF-16 line terminators are recognized like
/// UTF-8 ones. As with [`std::io::BufRead::lines`], each yielded line has its terminator
/// removed, and a read failure surfaces as an `Err` item. The file handle is released
/// when the iterator is dropped.
pub fn lines(
    path: impl AsRef<Path>,
    hint: EncodingHint,
) -> io::Result<io::Lines<io::BufReader<FileReader>>> {
    use io::BufRead as _;
    Ok(io::BufReader::new(open(path, hint)?).lines())
}

/// Decodes an in-memory buffer into UTF-8, honoring a BOM if one is present.
///
/// The non-streaming variant of [`UtfReader`]. When the input is BOM-less valid UTF-8 and
/// the hint is UTF-8, the input is borrowed unchanged; otherwise a converted copy is
/// returned, with malformed sequences replaced by U+FFFD. To decode an in-memory buffer
/// incrementally instead, wrap it in a reader: `UtfReader::new(&bytes[..], hint)`.
///
/// # Examples
///
/// ```rust
/// use anyutf::EncodingHint;
///
/// let text = anyutf::decode_bytes(&[0xFE, 0xFF, 0, b'o', 0, b'k'], EncodingHint::Utf8);
/// assert_eq!(text, "ok");
/// ```
pub fn decode_bytes(bytes: &[u8], hint: EncodingHint) -> Cow<'_, str> {
    let (text, _, _) = hint.encoding().decode(bytes);
    text
}

#[cfg(test)]
mod tests;
