//! [`EncryptedValue`]: a still-encrypted value whose plaintext is resolved on demand.
//!
//! Values are serialisable so they can be persisted next to the data they
//! describe. The explicit key is never serialised: a value read back from
//! storage always resolves through the key-rotation chain.

use serde::{Deserialize, Serialize};

use crate::key::Key;

/// Immutable descriptor of encrypted data.
///
/// Holds the ciphertext token plus, optionally, the exact key and the driver
/// name to decrypt it with. Resolution is performed by the encryption service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedValue {
    ciphertext: String,
    #[serde(skip)]
    key: Option<Key>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    driver: Option<String>,
}

impl EncryptedValue {
    /// Describe `ciphertext` with no bound key and no explicit driver.
    pub fn new(ciphertext: impl Into<String>) -> Self {
        Self {
            ciphertext: ciphertext.into(),
            key: None,
            driver: None,
        }
    }

    /// Bind the exact key this value must be decrypted with.
    pub fn with_key(self, key: Key) -> Self {
        Self {
            key: Some(key),
            ..self
        }
    }

    /// Name the driver this value must be decrypted with.
    pub fn with_driver(self, driver: impl Into<String>) -> Self {
        Self {
            driver: Some(driver.into()),
            ..self
        }
    }

    /// The ciphertext token.
    pub fn ciphertext(&self) -> &str {
        &self.ciphertext
    }

    /// The explicitly bound key, if any.
    pub fn key(&self) -> Option<&Key> {
        self.key.as_ref()
    }

    /// The explicitly named driver, if any. An empty name counts as absent.
    pub fn driver(&self) -> Option<&str> {
        self.driver.as_deref().filter(|name| !name.is_empty())
    }
}
