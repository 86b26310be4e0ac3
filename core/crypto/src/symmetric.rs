//! Symmetric payload encryption.
//!
//! A thin pass-through to the SM4 engine; no framing is added or removed.

use crate::config::CryptoConfig;
use crate::primitive::SymmetricPrimitive;
use crate::sm4_cipher::Sm4Cipher;
use smseal_common::Result;

/// Encrypts and decrypts payloads with caller-supplied keys.
#[derive(Debug, Clone, Default)]
pub struct SymmetricCipher<P = Sm4Cipher> {
    primitive: P,
}

impl SymmetricCipher<Sm4Cipher> {
    /// SM4 in ECB mode with hex ciphertext.
    pub fn new() -> Self {
        Self::with_primitive(Sm4Cipher::new())
    }

    /// SM4 with the options from `config`.
    pub fn from_config(config: &CryptoConfig) -> Result<Self> {
        Ok(Self::with_primitive(Sm4Cipher::with_options(config.sm4.clone())?))
    }
}

impl<P: SymmetricPrimitive> SymmetricCipher<P> {
    /// Cipher over an arbitrary primitive.
    pub fn with_primitive(primitive: P) -> Self {
        Self { primitive }
    }

    /// Encrypt `text` under `key`.
    ///
    /// # Errors
    /// - `Error::Cipher` if the key is malformed
    pub fn encrypt(&self, text: &str, key: &str) -> Result<String> {
        self.primitive.encrypt(text, key)
    }

    /// Decrypt `cipher_text` under `key`.
    ///
    /// # Errors
    /// - `Error::Cipher` on a malformed key or ciphertext, or a failed padding check
    pub fn decrypt(&self, cipher_text: &str, key: &str) -> Result<String> {
        self.primitive.decrypt(cipher_text, key)
    }
}

/// Encrypt with SM4 defaults.
pub fn encrypt_symmetric(text: &str, key: &str) -> Result<String> {
    SymmetricCipher::new().encrypt(text, key)
}

/// Decrypt with SM4 defaults.
pub fn decrypt_symmetric(cipher_text: &str, key: &str) -> Result<String> {
    SymmetricCipher::new().decrypt(cipher_text, key)
}
