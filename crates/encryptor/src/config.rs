//! Configuration loading and validation for the encryption service.
//!
//! Values are read from environment variables:
//!
//! | variable            | meaning                                          | default     |
//! |---------------------|--------------------------------------------------|-------------|
//! | `APP_KEY`           | current key                                      | unset       |
//! | `APP_PREVIOUS_KEYS` | comma-separated retired keys, newest first       | unset       |
//! | `ENCRYPTOR_DRIVER`  | default driver name                              | `aes256gcm` |
//!
//! Keys cannot contain commas. Blank entries in `APP_PREVIOUS_KEYS` are skipped.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::crypto::AES_256_GCM;

/// Validated encryption service configuration.
#[derive(Clone, Deserialize)]
pub struct EncryptorConfig {
    /// Current key. Without it only explicit keys can be used.
    #[serde(default)]
    pub app_key: Option<String>,

    /// Comma-separated retired keys, newest first.
    #[serde(default)]
    pub app_previous_keys: Option<String>,

    /// Driver used when callers do not name one.
    #[serde(default = "default_driver")]
    pub encryptor_driver: String,
}

fn default_driver() -> String {
    AES_256_GCM.into()
}

impl EncryptorConfig {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be read or fails validation.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config::Environment::default())
    }

    fn from_environment(source: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(source)
            .build()
            .context("failed to build encryptor configuration from environment")?;

        let c: EncryptorConfig = cfg
            .try_deserialize()
            .context("failed to deserialise encryptor configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// Retired keys in configured order, blank entries removed.
    pub fn previous_keys(&self) -> Vec<&str> {
        self.app_previous_keys
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|key| !key.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        if self.encryptor_driver.trim().is_empty() {
            anyhow::bail!("ENCRYPTOR_DRIVER must not be empty");
        }
        match self.app_key.as_deref() {
            Some(key) if key.is_empty() => {
                anyhow::bail!("APP_KEY must not be empty when set");
            }
            None if !self.previous_keys().is_empty() => {
                anyhow::bail!("APP_PREVIOUS_KEYS requires APP_KEY to be set");
            }
            _ => {}
        }
        Ok(())
    }
}

impl std::fmt::Debug for EncryptorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.debug_struct("EncryptorConfig")
            .field("app_key", &self.app_key.as_ref().map(|_| "[REDACTED]"))
            .field("app_previous_keys", &self.previous_keys().len())
            .field("encryptor_driver", &self.encryptor_driver)
            .finish()
    }
}
