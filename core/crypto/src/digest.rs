//! SM3 and SHA-256 digests.

use sha2::Sha256;
use sm3::{Digest, Sm3};
use subtle::ConstantTimeEq;

use crate::encoding::bytes_to_hex;

/// SM3 digest of `text` as lowercase hex.
pub fn sm3_hex(text: &str) -> String {
    bytes_to_hex(&Sm3::digest(text.as_bytes()))
}

/// SM3 digest of `salt || text` as lowercase hex.
pub fn sm3_hex_salted(text: &str, salt: &str) -> String {
    let mut hasher = Sm3::new();
    hasher.update(salt.as_bytes());
    hasher.update(text.as_bytes());
    bytes_to_hex(&hasher.finalize())
}

/// SHA-256 digest of `text` as lowercase hex.
pub fn sha256_hex(text: &str) -> String {
    bytes_to_hex(&Sha256::digest(text.as_bytes()))
}

/// Check `text` against an expected hex digest.
///
/// The comparison is constant-time in the digest contents; the expected
/// value is compared case-insensitively.
pub fn verify_sm3_hex(text: &str, expected: &str) -> bool {
    let actual = sm3_hex(text);
    let expected = expected.to_ascii_lowercase();
    actual.as_bytes().ct_eq(expected.as_bytes()).into()
}
