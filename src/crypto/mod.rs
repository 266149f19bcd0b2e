//! Cryptographic module for obfuscated chat messages
//!
//! A password is hashed once into the run's key material, and the resulting
//! key drives AES-128-CBC over whole message payloads. The same password
//! always derives the same key, so a party encrypting a log and a party
//! decrypting it later only need to share the password.

pub mod aes128;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use crate::crypto::aes128::Aes128CbcBlock;

/// Core encryption/decryption trait
///
/// Implementations transform a whole message payload in-place. Encrypting
/// leaves the buffer self-contained (any IV travels inside it); decrypting
/// consumes that framing again. The trait is marked as `Send + Sync` to
/// enable safe usage behind shared references.
pub trait Block: Send + Sync {
    /// Encrypts data in-place
    ///
    /// # Arguments
    /// * `data` - Mutable byte vector to be encrypted
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if encryption fails
    fn encrypt(&self, data: &mut Vec<u8>) -> crate::Result<()>;

    /// Decrypts data in-place
    ///
    /// # Arguments
    /// * `data` - Mutable byte vector to be decrypted
    ///
    /// # Returns
    /// * `Ok(())` on success
    /// * `Err` if decryption fails
    fn decrypt(&self, data: &mut Vec<u8>) -> crate::Result<()>;
}

/// Hashes a password into the run's 32-byte key material.
///
/// Single-pass Blake2b-256 over the UTF-8 bytes of the password, no salt and
/// no iteration count. Any string is accepted, including the empty one. Both
/// sides of an exchange must derive the identical key from the same password,
/// so the hash must stay byte-for-byte stable across versions.
pub fn derive_key(password: &str) -> [u8; 32] {
    Blake2b::<U32>::digest(password.as_bytes()).into()
}

/// Factory function to create the message cipher for a password
///
/// Derives the key material and returns the cipher keyed with it. Only the
/// first 16 bytes of the material key the cipher.
///
/// # Examples
/// ```
/// use logveil::crypto::new_block;
/// let cipher = new_block("hunter2");
/// ```
pub fn new_block(password: &str) -> Box<dyn Block> {
    Box::new(Aes128CbcBlock::new(&derive_key(password)))
}
