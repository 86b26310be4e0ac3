//! Seams between the orchestration layer and the cipher implementations.
//!
//! The encryptor and the symmetric cipher only talk to these traits, so the
//! concrete SM2/SM4 engines can be swapped for instrumented ones in tests.

use std::sync::Arc;

use smseal_common::{CipherMode, Result};

/// Public-key encryption primitive.
pub trait AsymmetricPrimitive: Send + Sync {
    /// Encrypt `plaintext` under a hex-encoded public point.
    ///
    /// # Postconditions
    /// - Returns lowercase hex of the ciphertext components in `mode` order
    /// - The leading uncompressed-point tag of C1 is not included
    ///
    /// # Errors
    /// - `Error::Encryption` if the key or input is rejected
    fn encrypt(&self, plaintext: &str, public_key_hex: &str, mode: CipherMode) -> Result<String>;
}

/// Symmetric block-cipher primitive operating on text.
pub trait SymmetricPrimitive: Send + Sync {
    /// Encrypt `text` under `key`.
    fn encrypt(&self, text: &str, key: &str) -> Result<String>;

    /// Decrypt `cipher_text` under `key`.
    fn decrypt(&self, cipher_text: &str, key: &str) -> Result<String>;
}

impl<P: AsymmetricPrimitive + ?Sized> AsymmetricPrimitive for Arc<P> {
    fn encrypt(&self, plaintext: &str, public_key_hex: &str, mode: CipherMode) -> Result<String> {
        (**self).encrypt(plaintext, public_key_hex, mode)
    }
}

impl<P: SymmetricPrimitive + ?Sized> SymmetricPrimitive for Arc<P> {
    fn encrypt(&self, text: &str, key: &str) -> Result<String> {
        (**self).encrypt(text, key)
    }

    fn decrypt(&self, cipher_text: &str, key: &str) -> Result<String> {
        (**self).decrypt(cipher_text, key)
    }
}
