use crate::codec::errors::CodecError;
use crate::codec::text;
use crate::crypto::Block;
use crate::crypto::aes128::{BLOCK_LEN, IV_LEN};

/// Marker some older clients still place in front of encoded messages.
pub const DEPRECATED_PREFIX: &str = "~!";

/// Encrypts a message and encodes it for transport.
///
/// The output is `iv || ciphertext` rendered as printable text. Sealing the
/// same message twice yields different text (fresh IV per call).
pub fn seal(plaintext: &str, block: &dyn Block) -> crate::Result<String> {
    let mut data = plaintext.as_bytes().to_vec();
    block.encrypt(&mut data)?;
    Ok(text::encode(&data))
}

/// Decodes and decrypts a transported message.
///
/// A leading `~!` marker is tolerated and stripped. Bad padding and
/// non-UTF-8 plaintext both surface as [`CodecError::DecryptionFailed`];
/// the causes are not told apart.
pub fn open(message: &str, block: &dyn Block) -> Result<String, CodecError> {
    let encoded = message.strip_prefix(DEPRECATED_PREFIX).unwrap_or(message);

    let mut data = text::decode(encoded)?;
    if data.len() < IV_LEN + BLOCK_LEN {
        return Err(CodecError::TooShort);
    }

    block
        .decrypt(&mut data)
        .map_err(CodecError::DecryptionFailed)?;

    String::from_utf8(data).map_err(|e| CodecError::DecryptionFailed(e.into()))
}
