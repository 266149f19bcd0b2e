//! Encoded-message codec
//!
//! The wire form of an encrypted chat message is a plain printable string:
//! every byte of `iv || ciphertext` maps 1:1 onto a codepoint in a fixed
//! 256-value CJK range, so the payload survives copy/paste, chat length
//! limits and logging pipelines that would mangle raw binary.
//!
//! # Payload format
//! ```text
//! +----------------+--------------------------+
//! |   IV (16 B)    |  ciphertext (16·n B)     |   AES-128-CBC, PKCS#7
//! +----------------+--------------------------+
//!   each byte b encoded as the char  '一' + b
//! ```
//!
//! [`text`] is the byte/codepoint mapping, [`logline`] the Justlog/Rustlog
//! line grammar, and [`message`] the whole-message seal/open composition.

pub mod errors;
pub mod logline;
pub mod message;
pub mod text;
