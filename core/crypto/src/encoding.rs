//! Conversions between the text encodings used for key material and ciphertext.
//!
//! Public keys arrive base64-encoded while the SM2 primitive consumes
//! lowercase hex, so the conversion here is the glue between the two.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;

use smseal_common::{Error, Result};

/// Standard alphabet that decodes with or without trailing `=` padding.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Convert a base64 string to lowercase hex.
///
/// Each decoded byte becomes exactly two hex digits, zero-padded, in byte
/// order with no separators.
///
/// # Errors
/// - Returns `Error::Decode` if `input` is not valid base64
pub fn base64_to_hex(input: &str) -> Result<String> {
    let raw = base64_decode(input)?;
    Ok(bytes_to_hex(&raw))
}

/// Decode a standard-alphabet base64 string; padding is optional.
pub fn base64_decode(input: &str) -> Result<Vec<u8>> {
    LENIENT
        .decode(input)
        .map_err(|e| Error::Decode(format!("Invalid base64: {}", e)))
}

/// Encode bytes as standard base64 with padding.
pub fn base64_encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Render bytes as lowercase hex.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Parse a hex string (either case) into bytes.
///
/// # Errors
/// - Returns `Error::Decode` on odd length or non-hex characters
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>> {
    hex::decode(input).map_err(|e| Error::Decode(format!("Invalid hex: {}", e)))
}
