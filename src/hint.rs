use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};

/// The encoding to assume for a stream that carries no byte-order mark.
///
/// A hint only matters when the stream head contains no recognized BOM; a BOM, when
/// present, is authoritative and silently overrides the hint. Guessing the encoding of
/// BOM-less input with certainty is impossible, so callers declare their best assumption
/// here, typically based on where the text came from. The [`WINDOWS`], [`POSIX`], and
/// [`HTML5`] constants name the common choices.
///
/// [`WINDOWS`]: EncodingHint::WINDOWS
/// [`POSIX`]: EncodingHint::POSIX
/// [`HTML5`]: EncodingHint::HTML5
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EncodingHint {
    Utf8,
    Utf16Le,
    Utf16Be,
}

impl EncodingHint {
    /// Assumption for text written by MS-Windows tools, which favor UTF-16LE.
    pub const WINDOWS: Self = Self::Utf16Le;

    /// Assumption for text written on Unix and Unix-like systems.
    pub const POSIX: Self = Self::Utf8;

    /// The assumption the W3C recommends for HTML5 content: UTF-8, with the BOM
    /// "considered more authoritative than anything else".
    pub const HTML5: Self = Self::Utf8;

    /// Returns the `encoding_rs` encoding this hint stands for.
    pub(crate) fn encoding(self) -> &'static Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::Utf16Le => UTF_16LE,
            Self::Utf16Be => UTF_16BE,
        }
    }
}
