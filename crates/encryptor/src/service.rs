//! [`Encryptor`]: driver selection, key validation and key-rotation fallback.
//!
//! # Key-rotation fallback
//!
//! [`Encryptor::decrypt_with_any_key`] and key-less [`Encryptor::resolve`]
//! try every candidate key in provider order (current key first, then
//! previous keys) and return the first plaintext that authenticates. When
//! every candidate fails, the error from the **last** attempt is returned;
//! earlier failures are only logged at `debug`.
//!
//! # Logging invariants
//!
//! - Key material and plaintext never appear in any log field. Attempts are
//!   identified by their position in the candidate list.

use std::sync::Arc;

use common::{EncryptedValue, EncryptorError, Key};
use tracing::{debug, info, warn};

use crate::config::EncryptorConfig;
use crate::crypto::{Driver, AES_256_GCM};
use crate::keys::{ArrayKeyProvider, KeyProvider};
use crate::registry::DriverRegistry;

/// Anything that can turn an [`EncryptedValue`] into plaintext.
pub trait EncryptedValueResolver {
    /// Decrypt `value` using its bound key, or the rotation chain if it has none.
    fn resolve(&self, value: &EncryptedValue) -> Result<Vec<u8>, EncryptorError>;
}

/// Encryption service over a set of named drivers.
///
/// Holds a [`DriverRegistry`], the name of the default driver, and either a
/// static default key or a [`KeyProvider`]. When both are attached the
/// provider wins. Apart from driver registration the service is immutable,
/// so a single instance can be shared across threads.
#[derive(Clone)]
pub struct Encryptor {
    registry: DriverRegistry,
    default_driver: String,
    default_key: Option<Key>,
    key_provider: Option<Arc<dyn KeyProvider>>,
}

impl Encryptor {
    /// Create a service with the built-in drivers, `aes256gcm` as default
    /// driver, and no keys attached.
    pub fn new() -> Self {
        Self {
            registry: DriverRegistry::with_defaults(),
            default_driver: AES_256_GCM.to_owned(),
            default_key: None,
            key_provider: None,
        }
    }

    /// Replace the driver registry.
    pub fn with_registry(self, registry: DriverRegistry) -> Self {
        Self { registry, ..self }
    }

    /// Set the driver used when no driver is named explicitly.
    pub fn with_default_driver(self, name: impl Into<String>) -> Self {
        Self {
            default_driver: name.into(),
            ..self
        }
    }

    /// Attach a static key, used when no key provider is attached.
    pub fn with_default_key(self, key: Key) -> Self {
        Self {
            default_key: Some(key),
            ..self
        }
    }

    /// Attach a key provider. It takes precedence over the static default key.
    pub fn with_key_provider(self, provider: impl KeyProvider + 'static) -> Self {
        Self {
            key_provider: Some(Arc::new(provider)),
            ..self
        }
    }

    /// Build a service from validated configuration.
    ///
    /// The built-in drivers are registered, the configured default driver
    /// must be one of them, and an [`ArrayKeyProvider`] is attached when a
    /// current key is configured.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptorError::UnknownDriver`] if the configured driver is
    /// not registered, or [`EncryptorError::InvalidKey`] for empty keys.
    pub fn from_config(cfg: &EncryptorConfig) -> Result<Self, EncryptorError> {
        let registry = DriverRegistry::with_defaults();
        // An unregistered default driver is a startup error.
        registry.get(&cfg.encryptor_driver)?;

        let mut encryptor = Self::new()
            .with_registry(registry)
            .with_default_driver(cfg.encryptor_driver.clone());

        if let Some(current) = cfg.app_key.as_deref() {
            let provider = ArrayKeyProvider::from_raw(current, cfg.previous_keys())?;
            info!(
                driver = %cfg.encryptor_driver,
                previous_keys = provider.previous_keys().len(),
                "encryptor configured with key provider"
            );
            encryptor = encryptor.with_key_provider(provider);
        } else {
            warn!(
                driver = %cfg.encryptor_driver,
                "encryptor configured without APP_KEY; only explicit keys are usable"
            );
        }

        Ok(encryptor)
    }

    /// Name of the default driver, as configured.
    pub fn default_driver(&self) -> &str {
        &self.default_driver
    }

    /// The driver registry.
    pub fn registry(&self) -> &DriverRegistry {
        &self.registry
    }

    /// Register an additional driver, replacing any driver with the same name.
    pub fn register_driver(&mut self, driver: impl Driver + 'static) {
        self.registry.register(driver);
    }

    /// Encrypt with the default driver.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptorError::InvalidKey`] if `key` is empty.
    pub fn encrypt(
        &self,
        plaintext: impl AsRef<[u8]>,
        key: impl AsRef<[u8]>,
    ) -> Result<String, EncryptorError> {
        self.encrypt_with_driver(&self.default_driver, plaintext, key)
    }

    /// Decrypt with the default driver and exactly `key`.
    pub fn decrypt(
        &self,
        ciphertext: &str,
        key: impl AsRef<[u8]>,
    ) -> Result<Vec<u8>, EncryptorError> {
        self.decrypt_with_driver(&self.default_driver, ciphertext, key)
    }

    /// Encrypt with the named driver.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptorError::InvalidKey`] if `key` is empty and
    /// [`EncryptorError::UnknownDriver`] if `driver` is not registered.
    pub fn encrypt_with_driver(
        &self,
        driver: &str,
        plaintext: impl AsRef<[u8]>,
        key: impl AsRef<[u8]>,
    ) -> Result<String, EncryptorError> {
        let key = require_key(key.as_ref())?;
        self.registry.get(driver)?.encrypt(plaintext.as_ref(), &key)
    }

    /// Decrypt with the named driver and exactly `key`.
    pub fn decrypt_with_driver(
        &self,
        driver: &str,
        ciphertext: &str,
        key: impl AsRef<[u8]>,
    ) -> Result<Vec<u8>, EncryptorError> {
        let key = require_key(key.as_ref())?;
        self.registry.get(driver)?.decrypt(ciphertext, &key)
    }

    /// Encrypt with the default driver under the current key.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptorError::InvalidKey`] if neither a key provider nor a
    /// default key is attached.
    pub fn encrypt_with_current_key(
        &self,
        plaintext: impl AsRef<[u8]>,
    ) -> Result<String, EncryptorError> {
        let key = self.current_key()?;
        self.registry
            .get(&self.default_driver)?
            .encrypt(plaintext.as_ref(), &key)
    }

    /// Decrypt by trying every rotation key in order.
    ///
    /// Uses `driver` when given, otherwise the default driver.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptorError::InvalidKey`] if there are no candidate keys,
    /// otherwise the error of the last key tried when none succeeds.
    pub fn decrypt_with_any_key(
        &self,
        ciphertext: &str,
        driver: Option<&str>,
    ) -> Result<Vec<u8>, EncryptorError> {
        let driver = driver.unwrap_or(&self.default_driver);
        self.decrypt_with_keys(driver, ciphertext, &self.key_candidates())
    }

    /// Decrypt `ciphertext` with the rotation chain and encrypt the plaintext
    /// again under the current key, with the same driver.
    ///
    /// Lets callers migrate stored values off retired keys.
    pub fn reencrypt(
        &self,
        ciphertext: &str,
        driver: Option<&str>,
    ) -> Result<String, EncryptorError> {
        let driver = driver.unwrap_or(&self.default_driver);
        let plaintext = self.decrypt_with_keys(driver, ciphertext, &self.key_candidates())?;
        let key = self.current_key()?;
        self.registry.get(driver)?.encrypt(&plaintext, &key)
    }

    /// Resolve a deferred value to plaintext.
    ///
    /// A bound key is used exclusively, with no fallback. Without one, the
    /// rotation chain is tried as in [`Encryptor::decrypt_with_any_key`]. The
    /// value's driver is used when named, otherwise the default driver.
    pub fn resolve(&self, value: &EncryptedValue) -> Result<Vec<u8>, EncryptorError> {
        let driver = value.driver().unwrap_or(&self.default_driver);
        match value.key() {
            Some(key) => self.registry.get(driver)?.decrypt(value.ciphertext(), key),
            None => self.decrypt_with_keys(driver, value.ciphertext(), &self.key_candidates()),
        }
    }

    fn current_key(&self) -> Result<Key, EncryptorError> {
        match &self.key_provider {
            Some(provider) => Ok(provider.current_key()),
            None => self.default_key.clone().ok_or(EncryptorError::InvalidKey),
        }
    }

    fn key_candidates(&self) -> Vec<Key> {
        match (&self.key_provider, &self.default_key) {
            (Some(provider), _) => provider.all_keys(),
            (None, Some(key)) => vec![key.clone()],
            (None, None) => Vec::new(),
        }
    }

    fn decrypt_with_keys(
        &self,
        driver_name: &str,
        ciphertext: &str,
        keys: &[Key],
    ) -> Result<Vec<u8>, EncryptorError> {
        if keys.is_empty() {
            return Err(EncryptorError::InvalidKey);
        }

        let driver = self.registry.get(driver_name)?;
        let mut last_error = None;

        for (key_index, key) in keys.iter().enumerate() {
            match driver.decrypt(ciphertext, key) {
                Ok(plaintext) => {
                    if key_index > 0 {
                        debug!(driver = driver.name(), key_index, "decrypted with previous key");
                    }
                    return Ok(plaintext);
                }
                Err(e) => {
                    debug!(
                        driver = driver.name(),
                        key_index,
                        code = e.code(),
                        "rotation key rejected"
                    );
                    last_error = Some(e);
                }
            }
        }

        let error = last_error.unwrap_or(EncryptorError::InvalidKey);
        warn!(
            driver = driver.name(),
            candidates = keys.len(),
            error = %error,
            "no rotation key could decrypt ciphertext"
        );
        Err(error)
    }
}

impl Default for Encryptor {
    fn default() -> Self {
        Self::new()
    }
}

impl EncryptedValueResolver for Encryptor {
    fn resolve(&self, value: &EncryptedValue) -> Result<Vec<u8>, EncryptorError> {
        Encryptor::resolve(self, value)
    }
}

impl std::fmt::Debug for Encryptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encryptor")
            .field("registry", &self.registry)
            .field("default_driver", &self.default_driver)
            .field("default_key", &self.default_key)
            .field("key_provider", &self.key_provider.is_some())
            .finish()
    }
}

fn require_key(material: &[u8]) -> Result<Key, EncryptorError> {
    Key::new(material)
}
