
use super::EncodingHint;

/// Reference text covering ASCII, two- and three-byte characters, astral-plane
/// characters whose UTF-16 form needs surrogate pairs, and a CRLF line break.
pub(crate) const REFERENCE: &str = "caffè Ω 日本語 😂👻\r\nsecond line, plain ASCII\n";

pub(crate) const ALL_HINTS: [EncodingHint; 3] = [
    EncodingHint::Utf8,
    EncodingHint::Utf16Le,
    EncodingHint::Utf16Be,
];

pub(crate) fn encode_utf8(text: &str, bom: bool) -> Vec<u8> {
    let mut out = Vec::new();
    if bom {
        out.extend_from_slice(&[0xEF, 0xBB, 0xBF]);
    }
    out.extend_from_slice(text.as_bytes());
    out
}

pub(crate) fn encode_utf16le(text: &str, bom: bool) -> Vec<u8> {
    let mut out = Vec::new();
    if bom {
        out.extend_from_slice(&[0xFF, 0xFE]);
    }
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

pub(crate) fn encode_utf16be(text: &str, bom: bool) -> Vec<u8> {
    let mut out = Vec::new();
    if bom {
        out.extend_from_slice(&[0xFE, 0xFF]);
    }
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_be_bytes());
    }
    out
}

#[test]
fn ex_readme_examples() -> std::io::Result<()> {
    use std::io::prelude::*;

    use super::{decode_bytes, UtfReader};

    let src: &[u8] = &[0xFF, 0xFE, b'h', 0, b'i', 0];
    let mut reader = UtfReader::new(src, EncodingHint::Utf8);
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    assert_eq!(text, "hi");

    let text = decode_bytes(&[0xFE, 0xFF, 0, b'o', 0, b'k'], EncodingHint::Utf8);
    assert_eq!(text, "ok");

    Ok(())
}
