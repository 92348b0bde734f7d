//! Standard base64 password codec.

use ::base64::engine::general_purpose::STANDARD;
use ::base64::Engine;

use crate::codec::{CodecError, PasswordCodec};

/// Encodes password text as padded standard base64 over its UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64Codec;

impl PasswordCodec for Base64Codec {
    fn name(&self) -> &'static str {
        "base64"
    }

    fn encode(&self, plaintext: &str) -> Result<String, CodecError> {
        Ok(STANDARD.encode(plaintext.as_bytes()))
    }

    fn decode(&self, encoded: &str) -> Result<String, CodecError> {
        // Editors sometimes leave surrounding whitespace in the text node
        let bytes = STANDARD.decode(encoded.trim())?;
        Ok(String::from_utf8(bytes)?)
    }
}
