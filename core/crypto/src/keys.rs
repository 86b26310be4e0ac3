//! Key types with secure memory handling.
//!
//! Symmetric keys and SM2 private keys zeroize their memory on drop and
//! never print their contents through `Debug`.

use sm2::{FieldBytes, PublicKey, SecretKey};
use std::fmt;
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::encoding::{base64_decode, base64_encode};
use smseal_common::{Error, Result, SensitiveBytes};

/// Length of a symmetric key in hex characters (128 bits).
pub const SYMMETRIC_KEY_HEX_LENGTH: usize = 32;

/// Length of an SM2 private scalar in bytes.
pub const SM2_PRIVATE_KEY_LENGTH: usize = 32;

/// Length of an uncompressed SM2 public point in bytes (`04 || x || y`).
pub const SM2_PUBLIC_KEY_LENGTH: usize = 65;

/// SEC1 tag for an uncompressed point.
pub const UNCOMPRESSED_POINT_TAG: u8 = 0x04;

/// Random SM4 key material as 32 lowercase hex characters.
///
/// Generated from a version 4 UUID, so it carries the UUID's random bits
/// and nothing more. It is not the output of a key-derivation function.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    key: String,
}

impl SymmetricKey {
    /// Generate a fresh key.
    ///
    /// Every call draws a new UUID v4 from the OS random source; nothing is
    /// cached between calls.
    pub fn generate() -> Self {
        // The simple form is the hyphenated form with its separators removed.
        let key = Uuid::new_v4().simple().to_string();
        Self { key }
    }

    /// Get the key as a hex string.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Take ownership of the hex string.
    pub fn into_string(mut self) -> String {
        std::mem::take(&mut self.key)
    }
}

impl AsRef<str> for SymmetricKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymmetricKey([REDACTED])")
    }
}

/// Generate new symmetric key material.
pub fn generate_symmetric_key() -> SymmetricKey {
    SymmetricKey::generate()
}

/// SM2 key pair for the receiving side of the exchange.
#[derive(Clone)]
pub struct Sm2KeyPair {
    secret: SecretKey,
}

impl Sm2KeyPair {
    /// Generate a random key pair.
    pub fn generate() -> Self {
        Self {
            secret: SecretKey::random(&mut rand::rng()),
        }
    }

    /// Restore a key pair from a base64-encoded private scalar.
    pub fn from_private_key_base64(private_key: &str) -> Result<Self> {
        Ok(Self {
            secret: parse_private_key(private_key)?,
        })
    }

    /// The public half.
    pub fn public_key(&self) -> PublicKey {
        self.secret.public_key()
    }

    /// The secret half.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    /// Public key as base64 of the 65-byte uncompressed point.
    ///
    /// This is the form the asymmetric encryptor expects as its key input.
    pub fn public_key_base64(&self) -> String {
        base64_encode(&self.public_key().to_sec1_bytes())
    }

    /// Private scalar as base64 of 32 big-endian bytes.
    pub fn private_key_base64(&self) -> String {
        let bytes = SensitiveBytes::new(self.secret.to_bytes().to_vec());
        base64_encode(bytes.as_bytes())
    }
}

impl fmt::Debug for Sm2KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sm2KeyPair")
            .field("public_key", &self.public_key_base64())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Parse a base64 private scalar.
///
/// Encodings produced by `BigInteger.toByteArray` carry a leading `0x00`
/// sign byte when the high bit is set, and drop leading zero bytes for
/// small scalars. Both are normalized to 32 bytes here.
pub fn parse_private_key(private_key: &str) -> Result<SecretKey> {
    let raw = SensitiveBytes::new(base64_decode(private_key)?);
    let mut bytes = raw.as_bytes();
    while bytes.len() > SM2_PRIVATE_KEY_LENGTH && bytes[0] == 0 {
        bytes = &bytes[1..];
    }

    if bytes.is_empty() || bytes.len() > SM2_PRIVATE_KEY_LENGTH {
        return Err(Error::InvalidKey(format!(
            "Invalid private key length: expected at most {}, got {}",
            SM2_PRIVATE_KEY_LENGTH,
            bytes.len()
        )));
    }

    let mut padded = FieldBytes::default();
    padded[SM2_PRIVATE_KEY_LENGTH - bytes.len()..].copy_from_slice(bytes);
    let secret = SecretKey::from_bytes(&padded)
        .map_err(|_| Error::InvalidKey("Private key is not a valid SM2 scalar".to_string()));
    padded.as_mut_slice().zeroize();
    secret
}

/// Parse a hex-encoded public point.
///
/// Accepts the 65-byte SEC1 uncompressed form and the bare 64-byte `x || y`
/// form, which is tagged as uncompressed before parsing.
pub fn parse_public_key_hex(public_key_hex: &str) -> Result<PublicKey> {
    let mut bytes = crate::encoding::hex_to_bytes(public_key_hex)?;
    if bytes.len() == SM2_PUBLIC_KEY_LENGTH - 1 {
        bytes.insert(0, UNCOMPRESSED_POINT_TAG);
    }

    PublicKey::from_sec1_bytes(&bytes)
        .map_err(|_| Error::InvalidKey("Public key is not a valid SM2 point".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_symmetric_key_format() {
        let key = generate_symmetric_key();

        assert_eq!(key.as_str().len(), SYMMETRIC_KEY_HEX_LENGTH);
        assert!(key
            .as_str()
            .chars()
            .all(|c| matches!(c, '0'..='9' | 'a'..='f')));
    }

    #[test]
    fn test_symmetric_key_unique_across_sample() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let key = generate_symmetric_key().into_string();
            assert!(seen.insert(key), "generated a repeated key");
        }
    }

    #[test]
    fn test_symmetric_key_generated_concurrently() {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                std::thread::spawn(|| {
                    (0..500)
                        .map(|_| generate_symmetric_key().into_string())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for key in handle.join().unwrap() {
                assert!(seen.insert(key));
            }
        }
        assert_eq!(seen.len(), 8 * 500);
    }

    #[test]
    fn test_symmetric_key_debug_redacted() {
        let key = generate_symmetric_key();
        let rendered = format!("{:?}", key);
        assert!(!rendered.contains(key.as_str()));
    }

    #[test]
    fn test_key_pair_base64_roundtrip() {
        let pair = Sm2KeyPair::generate();

        let public = base64_decode(&pair.public_key_base64()).unwrap();
        assert_eq!(public.len(), SM2_PUBLIC_KEY_LENGTH);
        assert_eq!(public[0], UNCOMPRESSED_POINT_TAG);

        let restored = Sm2KeyPair::from_private_key_base64(&pair.private_key_base64()).unwrap();
        assert_eq!(restored.public_key_base64(), pair.public_key_base64());
    }

    #[test]
    fn test_private_key_with_sign_byte() {
        let pair = Sm2KeyPair::generate();
        let mut raw = vec![0u8];
        raw.extend_from_slice(&pair.secret_key().to_bytes());

        let parsed = parse_private_key(&base64_encode(&raw)).unwrap();
        assert_eq!(parsed.to_bytes(), pair.secret_key().to_bytes());
    }

    #[test]
    fn test_private_key_too_long_fails() {
        let raw = [0x11u8; 33];
        let result = parse_private_key(&base64_encode(&raw));
        assert!(matches!(result, Err(Error::InvalidKey(_))));
    }

    #[test]
    fn test_public_key_without_tag() {
        let pair = Sm2KeyPair::generate();
        let point = pair.public_key().to_sec1_bytes();
        assert_eq!(point.len(), SM2_PUBLIC_KEY_LENGTH);
        let bare = hex::encode(&point[1..]);

        let parsed = parse_public_key_hex(&bare).unwrap();
        assert_eq!(parsed, pair.public_key());
    }

    #[test]
    fn test_public_key_not_on_curve() {
        let bogus = format!("04{}", "11".repeat(64));
        assert!(matches!(
            parse_public_key_hex(&bogus),
            Err(Error::InvalidKey(_))
        ));
    }
}
