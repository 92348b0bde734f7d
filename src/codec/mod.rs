//! Password codec subsystem.
//!
//! # Data Flow
//! ```text
//! persisted document (password text encoded)
//!     → decode on load → editable document (plaintext)
//!     → encode on save → persisted document
//! ```
//!
//! # Security Constraints
//! - Password values are never logged, encoded or decoded
//! - A value that cannot be decoded is an error, never passed through unchanged

pub mod base64;

use thiserror::Error;

pub use self::base64::Base64Codec;

/// Errors raised by a password codec.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The stored value is not in the codec's encoding.
    #[error("invalid encoded password: {0}")]
    InvalidEncoding(#[from] ::base64::DecodeError),

    /// The decoded bytes are not UTF-8 text.
    #[error("decoded password is not valid UTF-8")]
    NotUtf8(#[from] std::string::FromUtf8Error),

    /// The codec refused the value for another reason.
    #[error("codec rejected value: {0}")]
    Rejected(String),
}

/// Reversible encoding applied to password text at rest.
pub trait PasswordCodec: Send + Sync + std::fmt::Debug {
    /// Short identifier used in log events.
    fn name(&self) -> &'static str;

    /// Plaintext → stored form.
    fn encode(&self, plaintext: &str) -> Result<String, CodecError>;

    /// Stored form → plaintext.
    fn decode(&self, encoded: &str) -> Result<String, CodecError>;
}
