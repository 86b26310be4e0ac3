//! Cryptographic utilities for protecting client/endpoint payloads.
//!
//! This module provides:
//! - SM2 encryption of outbound plaintext, framed with the `04` marker in C1C3C2 order
//! - Fresh SM4 key material from random UUIDs
//! - SM4 encryption and decryption of payloads
//! - SM2 key pairs and decryption for the receiving side, and SM3/SHA-256 digests
//!
//! # Security Guarantees
//! - Cipher arithmetic comes from the RustCrypto `sm2`, `sm3` and `sm4` crates
//! - No plaintext or key material is ever logged
//! - Key material is zeroized on drop

pub mod asymmetric;
pub mod config;
pub mod digest;
pub mod encoding;
pub mod keys;
pub mod primitive;
pub mod sm2_cipher;
pub mod sm4_cipher;
pub mod symmetric;

pub use asymmetric::{encrypt_asymmetric, AsymmetricEncryptor, CIPHER_MODE, UNCOMPRESSED_MARKER};
pub use config::{CryptoConfig, DEFAULT_PUBLIC_KEY_ENV};
pub use digest::{sha256_hex, sm3_hex, sm3_hex_salted, verify_sm3_hex};
pub use encoding::base64_to_hex;
pub use keys::{generate_symmetric_key, Sm2KeyPair, SymmetricKey};
pub use primitive::{AsymmetricPrimitive, SymmetricPrimitive};
pub use sm2_cipher::Sm2Cipher;
pub use sm4_cipher::{Sm4Cipher, Sm4Mode, Sm4Options};
pub use symmetric::{decrypt_symmetric, encrypt_symmetric, SymmetricCipher};

pub use smseal_common::{CipherMode, Error, Result, TextEncoding};
