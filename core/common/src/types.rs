//! Common types used throughout smseal.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// Ordering of the SM2 ciphertext components.
///
/// The numeric selectors match the ones used by the browser-side SM2
/// library (`0` for C1C2C3, `1` for C1C3C2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CipherMode {
    /// Point, stream ciphertext, digest.
    C1C2C3,
    /// Point, digest, stream ciphertext.
    C1C3C2,
}

impl CipherMode {
    /// Numeric selector understood by the client library.
    pub fn selector(&self) -> u8 {
        match self {
            CipherMode::C1C2C3 => 0,
            CipherMode::C1C3C2 => 1,
        }
    }

    /// Parse a numeric selector.
    pub fn from_selector(selector: u8) -> crate::Result<Self> {
        match selector {
            0 => Ok(CipherMode::C1C2C3),
            1 => Ok(CipherMode::C1C3C2),
            other => Err(crate::Error::InvalidInput(format!(
                "Unknown cipher mode selector: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherMode::C1C2C3 => write!(f, "C1C2C3"),
            CipherMode::C1C3C2 => write!(f, "C1C3C2"),
        }
    }
}

/// Text encoding used for ciphertext strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// Lowercase hexadecimal.
    #[default]
    Hex,
    /// Standard base64 with padding.
    Base64,
}

/// Sensitive data wrapper that zeroizes on drop.
#[derive(Clone, Zeroize)]
#[zeroize(drop)]
pub struct SensitiveBytes(Vec<u8>);

impl SensitiveBytes {
    /// Create new sensitive bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    /// Get a reference to the inner bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Get the length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SensitiveBytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SensitiveBytes([REDACTED; {} bytes])", self.0.len())
    }
}
