//! SM2 public-key encryption backed by the `sm2` crate.

use sm2::pke::{DecryptingKey, EncryptingKey, Mode};
use tracing::debug;

use crate::encoding::{bytes_to_hex, hex_to_bytes};
use crate::keys::{parse_private_key, parse_public_key_hex, UNCOMPRESSED_POINT_TAG};
use crate::primitive::AsymmetricPrimitive;
use smseal_common::{CipherMode, Error, Result};

/// Length of the SM3 digest component (C3) in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Length of the uncompressed C1 point in bytes, tag included.
pub const POINT_SIZE: usize = 65;

/// SM2 engine.
///
/// Its raw ciphertext leaves out the leading tag byte of C1, so callers
/// that need the standard SEC1 framing add the `04` marker back.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sm2Cipher;

impl Sm2Cipher {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Decrypt a framed hex ciphertext with a base64 private scalar.
    ///
    /// # Preconditions
    /// - `cipher_hex` must include the leading `04` marker
    /// - Components must be in `mode` order
    ///
    /// # Errors
    /// - `Error::Decode` if `cipher_hex` is not hex
    /// - `Error::InvalidKey` if the private key is malformed
    /// - `Error::Decryption` if the digest check fails or the plaintext is not UTF-8
    pub fn decrypt(&self, cipher_hex: &str, private_key: &str, mode: CipherMode) -> Result<String> {
        let ciphertext = hex_to_bytes(cipher_hex)?;
        if ciphertext.len() <= POINT_SIZE + DIGEST_SIZE {
            return Err(Error::Decryption("Ciphertext too short".to_string()));
        }
        if ciphertext[0] != UNCOMPRESSED_POINT_TAG {
            return Err(Error::Decryption(
                "Ciphertext does not start with an uncompressed point".to_string(),
            ));
        }

        let secret = parse_private_key(private_key)?;
        let key = DecryptingKey::new_with_mode(secret.to_nonzero_scalar(), pke_mode(mode));

        debug!(ciphertext_len = ciphertext.len(), %mode, "SM2 decrypting");
        let plaintext = key
            .decrypt(&ciphertext)
            .map_err(|e| Error::Decryption(format!("SM2 decryption failed: {}", e)))?;

        String::from_utf8(plaintext)
            .map_err(|_| Error::Decryption("Plaintext is not valid UTF-8".to_string()))
    }
}

impl AsymmetricPrimitive for Sm2Cipher {
    fn encrypt(&self, plaintext: &str, public_key_hex: &str, mode: CipherMode) -> Result<String> {
        let public_key = parse_public_key_hex(public_key_hex)
            .map_err(|e| Error::Encryption(format!("Public key rejected: {}", e)))?;

        let key = EncryptingKey::new_with_mode(public_key, pke_mode(mode));
        let ciphertext = key
            .encrypt(&mut rand::rng(), plaintext.as_bytes())
            .map_err(|e| Error::Encryption(format!("SM2 encryption failed: {}", e)))?;

        match ciphertext.split_first() {
            Some((&UNCOMPRESSED_POINT_TAG, rest)) => Ok(bytes_to_hex(rest)),
            _ => Err(Error::Encryption(
                "SM2 ciphertext has an unexpected point encoding".to_string(),
            )),
        }
    }
}

fn pke_mode(mode: CipherMode) -> Mode {
    match mode {
        CipherMode::C1C2C3 => Mode::C1C2C3,
        CipherMode::C1C3C2 => Mode::C1C3C2,
    }
}
