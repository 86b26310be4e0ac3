//! Process configuration for the cipher layer.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::sm4_cipher::Sm4Options;
use smseal_common::{Error, Result};

/// Environment variable holding the default SM2 public key (base64).
pub const DEFAULT_PUBLIC_KEY_ENV: &str = "SMSEAL_SM2_PUBLIC_KEY";

/// Configuration injected into the encryptor and the symmetric cipher.
///
/// Immutable once built; share it by reference or clone it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoConfig {
    /// Base64 public key used when a call supplies none.
    pub default_public_key: Option<String>,
    /// SM4 engine options.
    pub sm4: Sm4Options,
}

impl CryptoConfig {
    /// Empty configuration: no default key, ECB/hex SM4.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default public key.
    pub fn with_default_public_key(mut self, public_key: impl Into<String>) -> Self {
        self.default_public_key = Some(public_key.into());
        self
    }

    /// Set the SM4 options.
    pub fn with_sm4_options(mut self, options: Sm4Options) -> Self {
        self.sm4 = options;
        self
    }

    /// Read the default public key from `SMSEAL_SM2_PUBLIC_KEY`.
    pub fn from_env() -> Self {
        Self::from_env_var(DEFAULT_PUBLIC_KEY_ENV)
    }

    /// Read the default public key from the named variable.
    ///
    /// An unset, empty or non-Unicode variable leaves the default unset.
    pub fn from_env_var(name: &str) -> Self {
        let default_public_key = std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        debug!(
            variable = name,
            configured = default_public_key.is_some(),
            "Resolved default public key from environment"
        );

        Self {
            default_public_key,
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file.
    ///
    /// # Errors
    /// - `Error::Io` if the file cannot be read
    /// - `Error::Serialization` if it is not valid configuration JSON
    /// - `Error::Config` if the SM4 options are unusable
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can build working ciphers.
    pub fn validate(&self) -> Result<()> {
        if matches!(self.default_public_key.as_deref(), Some(key) if key.trim().is_empty()) {
            return Err(Error::Config(
                "default_public_key is set but empty".to_string(),
            ));
        }
        self.sm4
            .validate()
            .map_err(|e| Error::Config(format!("Invalid SM4 options: {}", e)))
    }

    /// Serialize configuration to JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sm4_cipher::Sm4Mode;
    use std::io::Write;

    #[test]
    fn test_from_env_var_set() {
        std::env::set_var("SMSEAL_TEST_KEY_SET", "AQID");
        let config = CryptoConfig::from_env_var("SMSEAL_TEST_KEY_SET");
        assert_eq!(config.default_public_key.as_deref(), Some("AQID"));
    }

    #[test]
    fn test_from_env_var_unset_or_empty() {
        let config = CryptoConfig::from_env_var("SMSEAL_TEST_KEY_NEVER_SET");
        assert!(config.default_public_key.is_none());

        std::env::set_var("SMSEAL_TEST_KEY_EMPTY", "  ");
        let config = CryptoConfig::from_env_var("SMSEAL_TEST_KEY_EMPTY");
        assert!(config.default_public_key.is_none());
    }

    #[test]
    fn test_json_roundtrip_and_defaults() {
        let config = CryptoConfig::new().with_default_public_key("AQID");
        let restored = CryptoConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(restored, config);

        let partial = CryptoConfig::from_json("{}").unwrap();
        assert_eq!(partial, CryptoConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"default_public_key":"AQID","sm4":{{"mode":"cbc","iv":"1234567890abcdef","encoding":"base64"}}}}"#
        )
        .unwrap();

        let config = CryptoConfig::load(file.path()).unwrap();
        assert_eq!(config.default_public_key.as_deref(), Some("AQID"));
        assert_eq!(config.sm4.mode, Sm4Mode::Cbc);
    }

    #[test]
    fn test_load_rejects_bad_sm4_options() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"sm4":{{"mode":"cbc"}}}}"#).unwrap();

        assert!(matches!(
            CryptoConfig::load(file.path()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = CryptoConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            CryptoConfig::load(file.path()),
            Err(Error::Serialization(_))
        ));
    }
}
