use encoding_rs::Encoding;

use super::EncodingHint;

/// Length of the longest recognized BOM, the three-byte UTF-8 one.
pub(crate) const MAX_BOM_LEN: usize = 3;

/// Selects the encoding of a stream from its leading bytes.
///
/// A recognized BOM (`EF BB BF`, `FF FE`, or `FE FF`) names the encoding regardless of
/// `hint`; otherwise the stream is assumed to be encoded as `hint` declares. Returns the
/// selected encoding and the number of leading bytes to strip, which is zero when no BOM
/// was found. `prefix` may be shorter than [`MAX_BOM_LEN`] when the stream itself is;
/// a truncated BOM prefix is ordinary content.
pub(crate) fn resolve(prefix: &[u8], hint: EncodingHint) -> (&'static Encoding, usize) {
    match Encoding::for_bom(prefix) {
        Some(found) => found,
        None => (hint.encoding(), 0),
    }
}
