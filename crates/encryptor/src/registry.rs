//! [`DriverRegistry`]: case-insensitive name → driver lookup.

use std::{collections::HashMap, sync::Arc};

use common::EncryptorError;
use tracing::info;

use crate::crypto::{Aes256GcmDriver, Aes256GcmSivDriver, Driver};

/// Named collection of encryption drivers.
///
/// Names are stored lower-cased; registering a driver whose name collides
/// (ignoring case) with an existing entry replaces it. Entries are never
/// removed. The registry is meant to be populated during setup and read
/// concurrently afterwards.
#[derive(Clone, Default)]
pub struct DriverRegistry {
    drivers: HashMap<String, Arc<dyn Driver>>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in AES-256-GCM and AES-256-GCM-SIV drivers.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Aes256GcmDriver::new());
        registry.register(Aes256GcmSivDriver::new());
        registry
    }

    /// Register `driver` under its lower-cased name.
    pub fn register(&mut self, driver: impl Driver + 'static) {
        self.register_shared(Arc::new(driver));
    }

    /// Register an already shared driver under its lower-cased name.
    pub fn register_shared(&mut self, driver: Arc<dyn Driver>) {
        let name = driver.name().to_lowercase();
        if self.drivers.insert(name.clone(), driver).is_some() {
            info!(driver = %name, "replaced previously registered encryptor driver");
        }
    }

    /// Returns `true` if a driver is registered under `name`, ignoring case.
    pub fn has(&self, name: &str) -> bool {
        self.drivers.contains_key(&name.to_lowercase())
    }

    /// Look up a driver by name, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptorError::UnknownDriver`] carrying `name` as given.
    pub fn get(&self, name: &str) -> Result<&dyn Driver, EncryptorError> {
        self.drivers
            .get(&name.to_lowercase())
            .map(|driver| driver.as_ref())
            .ok_or_else(|| EncryptorError::UnknownDriver(name.to_owned()))
    }

    /// Registered (lower-cased) names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.drivers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered drivers.
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Returns `true` if no drivers are registered.
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}

impl std::fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("drivers", &self.names())
            .finish()
    }
}
