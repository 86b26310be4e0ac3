//! Common utilities and types shared across smseal modules.
//!
//! This module provides the error taxonomy and the small value types that
//! the cipher crates exchange.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{CipherMode, SensitiveBytes, TextEncoding};
