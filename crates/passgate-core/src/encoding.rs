//! Base64 text form of stored salts and hashes.
//!
//! Output is padded standard base64 on a single line. Input may be padded
//! or unpadded; whitespace, line breaks and non-canonical trailing bits are
//! rejected.

use data_encoding::{BASE64, BASE64_NOPAD};

use crate::error::VerifierError;

/// Field label for a stored salt in `MalformedEncoding` errors.
pub const SALT_FIELD: &str = "salt";

/// Field label for a stored hash in `MalformedEncoding` errors.
pub const HASH_FIELD: &str = "hash";

/// Encode bytes as padded standard base64 with no line wrapping.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Decode standard base64, padded or unpadded.
///
/// # Errors
///
/// Returns `VerifierError::MalformedEncoding` tagged with `field` if the
/// text is not valid base64.
pub fn decode(text: &str, field: &'static str) -> Result<Vec<u8>, VerifierError> {
    let encoding = if text.len() % 4 == 0 {
        &BASE64
    } else {
        &BASE64_NOPAD
    };
    encoding
        .decode(text.as_bytes())
        .map_err(|e| VerifierError::MalformedEncoding {
            field,
            reason: e.to_string(),
        })
}
