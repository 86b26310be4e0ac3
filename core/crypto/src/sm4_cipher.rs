//! SM4 block cipher backed by the `sm4`, `ecb` and `cbc` crates.
//!
//! Defaults to ECB with PKCS#7 padding and hex ciphertext, which is what the
//! browser-side library produces for `sm4.encrypt(text, key)`.

use ecb::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use serde::{Deserialize, Serialize};
use sm4::Sm4;
use tracing::debug;

use crate::encoding::{base64_decode, base64_encode, bytes_to_hex, hex_to_bytes};
use crate::primitive::SymmetricPrimitive;
use smseal_common::{Error, Result, SensitiveBytes, TextEncoding};

/// SM4 block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// SM4 key size in bytes.
pub const KEY_SIZE: usize = 16;

type EcbEncryptor = ecb::Encryptor<Sm4>;
type EcbDecryptor = ecb::Decryptor<Sm4>;
type CbcEncryptor = cbc::Encryptor<Sm4>;
type CbcDecryptor = cbc::Decryptor<Sm4>;

/// Block cipher mode of operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sm4Mode {
    /// Electronic codebook.
    #[default]
    Ecb,
    /// Cipher block chaining; needs an IV.
    Cbc,
}

/// Options for the SM4 engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sm4Options {
    /// Mode of operation.
    pub mode: Sm4Mode,
    /// IV for CBC, used as its UTF-8 bytes (16 of them).
    pub iv: Option<String>,
    /// Encoding of ciphertext strings.
    pub encoding: TextEncoding,
}

impl Sm4Options {
    /// CBC with the given IV.
    pub fn cbc(iv: impl Into<String>) -> Self {
        Self {
            mode: Sm4Mode::Cbc,
            iv: Some(iv.into()),
            ..Self::default()
        }
    }

    /// Set the ciphertext encoding.
    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Check that the options describe a usable cipher.
    pub fn validate(&self) -> Result<()> {
        match (self.mode, self.iv.as_deref()) {
            (Sm4Mode::Ecb, _) => Ok(()),
            (Sm4Mode::Cbc, Some(iv)) if iv.len() == BLOCK_SIZE => Ok(()),
            (Sm4Mode::Cbc, Some(iv)) => Err(Error::InvalidInput(format!(
                "Invalid IV length: expected {}, got {}",
                BLOCK_SIZE,
                iv.len()
            ))),
            (Sm4Mode::Cbc, None) => Err(Error::InvalidInput("CBC mode requires an IV".to_string())),
        }
    }
}

/// SM4 engine.
#[derive(Debug, Clone, Default)]
pub struct Sm4Cipher {
    options: Sm4Options,
}

impl Sm4Cipher {
    /// ECB, PKCS#7, hex.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with explicit options.
    ///
    /// # Errors
    /// - `Error::InvalidInput` if CBC is selected without a 16-byte IV
    pub fn with_options(options: Sm4Options) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Get the options in use.
    pub fn options(&self) -> &Sm4Options {
        &self.options
    }

    fn iv(&self) -> &[u8] {
        self.options.iv.as_deref().map(str::as_bytes).unwrap_or_default()
    }

    fn encode(&self, bytes: &[u8]) -> String {
        match self.options.encoding {
            TextEncoding::Hex => bytes_to_hex(bytes),
            TextEncoding::Base64 => base64_encode(bytes),
        }
    }

    fn decode(&self, text: &str) -> Result<Vec<u8>> {
        let decoded = match self.options.encoding {
            TextEncoding::Hex => hex_to_bytes(text),
            TextEncoding::Base64 => base64_decode(text),
        };
        decoded.map_err(|e| Error::Cipher(format!("Malformed ciphertext: {}", e)))
    }
}

impl SymmetricPrimitive for Sm4Cipher {
    fn encrypt(&self, text: &str, key: &str) -> Result<String> {
        let key = parse_key(key)?;
        let plaintext = text.as_bytes();

        let ciphertext = match self.options.mode {
            Sm4Mode::Ecb => EcbEncryptor::new_from_slice(key.as_bytes())
                .map_err(|e| Error::Cipher(format!("Invalid key: {}", e)))?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            Sm4Mode::Cbc => CbcEncryptor::new_from_slices(key.as_bytes(), self.iv())
                .map_err(|e| Error::Cipher(format!("Invalid key or IV: {}", e)))?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
        };

        debug!(
            plaintext_len = plaintext.len(),
            ciphertext_len = ciphertext.len(),
            mode = ?self.options.mode,
            "SM4 encrypted"
        );
        Ok(self.encode(&ciphertext))
    }

    fn decrypt(&self, cipher_text: &str, key: &str) -> Result<String> {
        let key = parse_key(key)?;
        let ciphertext = self.decode(cipher_text)?;

        if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(Error::Cipher(format!(
                "Ciphertext length {} is not a positive multiple of {}",
                ciphertext.len(),
                BLOCK_SIZE
            )));
        }

        let plaintext = match self.options.mode {
            Sm4Mode::Ecb => EcbDecryptor::new_from_slice(key.as_bytes())
                .map_err(|e| Error::Cipher(format!("Invalid key: {}", e)))?
                .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext),
            Sm4Mode::Cbc => CbcDecryptor::new_from_slices(key.as_bytes(), self.iv())
                .map_err(|e| Error::Cipher(format!("Invalid key or IV: {}", e)))?
                .decrypt_padded_vec_mut::<Pkcs7>(&ciphertext),
        }
        .map_err(|_| Error::Cipher("Decryption failed: bad padding".to_string()))?;

        debug!(ciphertext_len = ciphertext.len(), mode = ?self.options.mode, "SM4 decrypted");
        String::from_utf8(plaintext)
            .map_err(|_| Error::Cipher("Decrypted data is not valid UTF-8".to_string()))
    }
}

/// Turn a key string into 16 key bytes.
///
/// A 32-character key is hex; a 16-character key is used as its UTF-8
/// bytes. Any other length is rejected.
pub fn parse_key(key: &str) -> Result<SensitiveBytes> {
    let bytes = match key.len() {
        32 => hex_to_bytes(key).map_err(|e| Error::Cipher(format!("Invalid key: {}", e)))?,
        16 => key.as_bytes().to_vec(),
        other => {
            return Err(Error::Cipher(format!(
                "Invalid key length: expected 32 hex or 16 raw characters, got {}",
                other
            )))
        }
    };
    debug_assert_eq!(bytes.len(), KEY_SIZE);
    Ok(SensitiveBytes::new(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::generate_symmetric_key;
    use proptest::prelude::*;

    // GB/T 32907-2016 example key; the plaintext of the example is the same 16 bytes.
    const STANDARD_KEY: &str = "0123456789abcdeffedcba9876543210";

    #[test]
    fn test_standard_vector() {
        let block = hex::decode(STANDARD_KEY).unwrap();

        let ct = EcbEncryptor::new_from_slice(&block)
            .unwrap()
            .encrypt_padded_vec_mut::<Pkcs7>(&block);
        assert_eq!(hex::encode(&ct[..BLOCK_SIZE]), "681edf34d206965e86b3e94f536e4246");
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let cipher = Sm4Cipher::new();
        let key = generate_symmetric_key();

        let ciphertext = cipher.encrypt("Hello, World!", key.as_str()).unwrap();
        assert!(ciphertext.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        assert_eq!(ciphertext.len(), BLOCK_SIZE * 2);

        let plaintext = cipher.decrypt(&ciphertext, key.as_str()).unwrap();
        assert_eq!(plaintext, "Hello, World!");
    }

    #[test]
    fn test_ecb_is_deterministic() {
        let cipher = Sm4Cipher::new();
        let ct1 = cipher.encrypt("same", STANDARD_KEY).unwrap();
        let ct2 = cipher.encrypt("same", STANDARD_KEY).unwrap();
        assert_eq!(ct1, ct2);
    }

    #[test]
    fn test_empty_plaintext_is_one_padding_block() {
        let cipher = Sm4Cipher::new();
        let ciphertext = cipher.encrypt("", STANDARD_KEY).unwrap();
        assert_eq!(ciphertext.len(), BLOCK_SIZE * 2);
        assert_eq!(cipher.decrypt(&ciphertext, STANDARD_KEY).unwrap(), "");
    }

    #[test]
    fn test_raw_sixteen_char_key() {
        let cipher = Sm4Cipher::new();
        let ciphertext = cipher.encrypt("payload", "abcdefghijklmnop").unwrap();
        assert_eq!(
            cipher.decrypt(&ciphertext, "abcdefghijklmnop").unwrap(),
            "payload"
        );
    }

    #[test]
    fn test_invalid_key_length() {
        let cipher = Sm4Cipher::new();
        assert!(matches!(cipher.encrypt("data", "short"), Err(Error::Cipher(_))));
        assert!(matches!(
            cipher.decrypt("00112233445566778899aabbccddeeff", "short"),
            Err(Error::Cipher(_))
        ));
    }

    #[test]
    fn test_non_hex_key_rejected() {
        let key = "zz".repeat(16);
        assert!(matches!(parse_key(&key), Err(Error::Cipher(_))));
    }

    #[test]
    fn test_wrong_key_fails() {
        let cipher = Sm4Cipher::new();
        let ciphertext = cipher.encrypt("Secret data", STANDARD_KEY).unwrap();

        let other = generate_symmetric_key();
        // A wrong key almost always breaks the padding; when it happens to
        // parse, the output still differs from the plaintext.
        match cipher.decrypt(&ciphertext, other.as_str()) {
            Ok(plaintext) => assert_ne!(plaintext, "Secret data"),
            Err(e) => assert!(matches!(e, Error::Cipher(_))),
        }
    }

    #[test]
    fn test_malformed_ciphertext() {
        let cipher = Sm4Cipher::new();
        assert!(matches!(cipher.decrypt("not hex", STANDARD_KEY), Err(Error::Cipher(_))));
        assert!(matches!(cipher.decrypt("abcd", STANDARD_KEY), Err(Error::Cipher(_))));
        assert!(matches!(cipher.decrypt("", STANDARD_KEY), Err(Error::Cipher(_))));
    }

    #[test]
    fn test_cbc_roundtrip_and_differs_from_ecb() {
        let cbc = Sm4Cipher::with_options(Sm4Options::cbc("1234567890abcdef")).unwrap();
        let ecb = Sm4Cipher::new();

        let text = "a payload spanning more than one block";
        let cbc_ct = cbc.encrypt(text, STANDARD_KEY).unwrap();
        let ecb_ct = ecb.encrypt(text, STANDARD_KEY).unwrap();

        assert_ne!(cbc_ct, ecb_ct);
        assert_eq!(cbc.decrypt(&cbc_ct, STANDARD_KEY).unwrap(), text);
    }

    #[test]
    fn test_cbc_requires_iv() {
        let missing = Sm4Options {
            mode: Sm4Mode::Cbc,
            ..Sm4Options::default()
        };
        assert!(matches!(
            Sm4Cipher::with_options(missing),
            Err(Error::InvalidInput(_))
        ));
        assert!(Sm4Cipher::with_options(Sm4Options::cbc("too short")).is_err());
    }

    #[test]
    fn test_base64_encoding() {
        let cipher =
            Sm4Cipher::with_options(Sm4Options::default().with_encoding(TextEncoding::Base64))
                .unwrap();
        let ciphertext = cipher.encrypt("base64 output", STANDARD_KEY).unwrap();

        assert!(base64_decode(&ciphertext).is_ok());
        assert_eq!(
            cipher.decrypt(&ciphertext, STANDARD_KEY).unwrap(),
            "base64 output"
        );
    }

    #[test]
    fn test_options_from_json() {
        let options: Sm4Options =
            serde_json::from_str(r#"{"mode":"cbc","iv":"1234567890abcdef"}"#).unwrap();
        assert_eq!(options.mode, Sm4Mode::Cbc);
        assert_eq!(options.encoding, TextEncoding::Hex);
        assert!(options.validate().is_ok());
    }

    proptest! {
        #[test]
        fn prop_roundtrip_with_generated_key(text in ".{0,200}") {
            let cipher = Sm4Cipher::new();
            let key = generate_symmetric_key();

            let ciphertext = cipher.encrypt(&text, key.as_str()).unwrap();
            prop_assert_eq!(cipher.decrypt(&ciphertext, key.as_str()).unwrap(), text);
        }
    }
}
