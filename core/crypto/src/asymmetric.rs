//! SM2 encryption of outbound plaintext.
//!
//! The encryptor resolves which public key to use, converts it from base64
//! to hex, runs the primitive in C1C3C2 order and frames the result with the
//! uncompressed-point marker. The receiving party expects exactly this
//! framing and ordering.

use tracing::{debug, warn};

use crate::config::CryptoConfig;
use crate::encoding::base64_to_hex;
use crate::primitive::AsymmetricPrimitive;
use crate::sm2_cipher::Sm2Cipher;
use smseal_common::{CipherMode, Error, Result};

/// Marker prepended to every ciphertext.
pub const UNCOMPRESSED_MARKER: &str = "04";

/// Component ordering expected by the receiving party.
pub const CIPHER_MODE: CipherMode = CipherMode::C1C3C2;

/// Encrypts plaintext under a recipient public key.
#[derive(Debug, Clone)]
pub struct AsymmetricEncryptor<P = Sm2Cipher> {
    primitive: P,
    config: CryptoConfig,
}

impl AsymmetricEncryptor<Sm2Cipher> {
    /// SM2 encryptor with the given configuration.
    pub fn new(config: CryptoConfig) -> Self {
        Self::with_primitive(Sm2Cipher::new(), config)
    }

    /// SM2 encryptor configured from the environment.
    pub fn from_env() -> Self {
        Self::new(CryptoConfig::from_env())
    }
}

impl<P: AsymmetricPrimitive> AsymmetricEncryptor<P> {
    /// Encryptor over an arbitrary primitive.
    pub fn with_primitive(primitive: P, config: CryptoConfig) -> Self {
        Self { primitive, config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    /// Encrypt `text` and return `"04"` followed by the hex ciphertext.
    ///
    /// # Postconditions
    /// - Empty `text` is returned as an empty string and the primitive is not called
    /// - Otherwise the primitive is called exactly once, in C1C3C2 mode
    ///
    /// # Errors
    /// - `Error::MissingKey` if `public_key` is `None` or empty and no default is configured
    /// - `Error::Decode` if the resolved key is not valid base64
    /// - `Error::Encryption` if the primitive rejects the key or input
    pub fn encrypt(&self, text: &str, public_key: Option<&str>) -> Result<String> {
        if text.is_empty() {
            return Ok(String::new());
        }

        let public_key = self.resolve_public_key(public_key)?;
        let public_key_hex = base64_to_hex(public_key)?;

        debug!(plaintext_len = text.len(), mode = %CIPHER_MODE, "SM2 encrypting");
        let raw = self.primitive.encrypt(text, &public_key_hex, CIPHER_MODE)?;

        let mut framed = String::with_capacity(UNCOMPRESSED_MARKER.len() + raw.len());
        framed.push_str(UNCOMPRESSED_MARKER);
        framed.push_str(&raw);
        Ok(framed)
    }

    /// Like [`encrypt`](Self::encrypt), passing absent or empty text through.
    pub fn encrypt_opt(&self, text: Option<&str>, public_key: Option<&str>) -> Result<Option<String>> {
        match text {
            None => Ok(None),
            Some(text) => self.encrypt(text, public_key).map(Some),
        }
    }

    fn resolve_public_key<'a>(&'a self, explicit: Option<&'a str>) -> Result<&'a str> {
        if let Some(key) = explicit.filter(|key| !key.is_empty()) {
            return Ok(key);
        }

        match self.config.default_public_key.as_deref() {
            Some(key) if !key.is_empty() => Ok(key),
            _ => {
                warn!("No public key supplied and no default configured");
                Err(Error::MissingKey)
            }
        }
    }
}

/// Encrypt with the SM2 primitive, falling back to the default key from the
/// environment.
///
/// The environment is read on every call, so a key exported before the
/// first call is picked up.
pub fn encrypt_asymmetric(text: &str, public_key: Option<&str>) -> Result<String> {
    AsymmetricEncryptor::from_env().encrypt(text, public_key)
}
