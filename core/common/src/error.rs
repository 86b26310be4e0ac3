//! Common error types for smseal.

use thiserror::Error;

/// Top-level error type for smseal operations.
///
/// Failures from the underlying cipher primitives are surfaced through
/// these variants unchanged; nothing in the workspace retries or masks them.
#[derive(Debug, Error)]
pub enum Error {
    /// Input was not valid base64 or hex.
    #[error("Decode error: {0}")]
    Decode(String),

    /// No public key was supplied and no default is configured.
    #[error("No public key supplied and no default public key configured")]
    MissingKey,

    /// Asymmetric encryption was rejected by the primitive.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Asymmetric decryption was rejected by the primitive.
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// Symmetric cipher operation failed.
    #[error("Cipher error: {0}")]
    Cipher(String),

    /// Key material has the wrong shape.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
