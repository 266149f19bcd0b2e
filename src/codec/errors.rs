//! Payload decoding and decryption errors
//!
//! This module defines the error type produced while turning an encoded
//! payload back into readable text. All errors implement the standard
//! Error trait for proper error propagation and handling.

use std::fmt;
use std::fmt::Display;

/// Payload decoding and decryption errors
///
/// Represents the failure modes of opening an encoded message: characters
/// outside the transport alphabet, payloads with no room for the IV, and
/// cryptographic failures.
#[derive(Debug)]
pub enum CodecError {
    /// A character of the payload is outside the encodable range
    ///
    /// Carries the zero-based character index and the offending character
    /// for diagnostics. Validation is fail-fast: the first bad character
    /// wins.
    ///
    /// In batch mode this typically marks a line that was never encrypted
    /// in the first place; such a line is passed through untouched.
    CharOutOfRange { index: usize, ch: char },

    /// Payload is too short to hold an IV and one cipher block
    TooShort,

    /// Payload decryption failed
    ///
    /// Wraps the underlying error. This can occur when:
    /// - PKCS#7 padding is invalid after decryption
    /// - The wrong password/key was used
    /// - The ciphertext was corrupted or truncated
    /// - The unpadded bytes are not valid UTF-8
    ///
    /// The causes are indistinguishable from each other; no integrity tag
    /// is checked.
    DecryptionFailed(crate::Error),
}

impl std::error::Error for CodecError {}

impl Display for CodecError {
    /// Formats the error for display and logging
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodecError::CharOutOfRange { index, ch } => write!(
                fmt,
                "character {:?} at index {} is outside the encoded range",
                ch, index
            ),
            CodecError::TooShort => "payload too short".fmt(fmt),
            CodecError::DecryptionFailed(e) => write!(fmt, "decryption failed: {}", e),
        }
    }
}
