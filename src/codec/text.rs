use crate::codec::errors::CodecError;

/// First codepoint of the 256-value transport range.
///
/// The range runs from `'一'` (U+4E00) to U+4EFF inclusive; a character's
/// offset from the anchor is the byte it represents.
pub const BASE_CHAR: char = '一';

const BASE: u32 = BASE_CHAR as u32;

/// Encodes a byte sequence as printable text, one codepoint per byte.
pub fn encode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| char::from_u32(BASE + u32::from(b)).unwrap())
        .collect()
}

/// Decodes transport text back into bytes.
///
/// Single pass, fail-fast: the first character outside the valid range
/// invalidates the whole string.
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    let mut bytes = Vec::with_capacity(text.chars().count());
    for (index, ch) in text.chars().enumerate() {
        let cp = ch as u32;
        if !(BASE..=BASE + 0xFF).contains(&cp) {
            return Err(CodecError::CharOutOfRange { index, ch });
        }
        bytes.push((cp - BASE) as u8);
    }
    Ok(bytes)
}
