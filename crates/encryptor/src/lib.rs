//! Encryption service with pluggable AEAD drivers and key-rotation fallback.
//!
//! Assembly happens once at startup; the resulting [`Encryptor`] is immutable
//! and can be shared by reference across threads.
//!
//! ```no_run
//! use encryptor::{EncryptedValue, Encryptor, EncryptorConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cfg = EncryptorConfig::from_env()?;
//! let encryptor = Encryptor::from_config(&cfg)?;
//!
//! let token = encryptor.encrypt_with_current_key("123-45-6789")?;
//! let ssn = encryptor.resolve(&EncryptedValue::new(token))?;
//! # let _ = ssn;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crypto;
pub mod keys;
pub mod registry;
pub mod service;

pub use common::{EncryptedValue, EncryptorError, Key};
pub use config::EncryptorConfig;
pub use crypto::{Aes256GcmDriver, Aes256GcmSivDriver, Driver, AES_256_GCM, AES_256_GCM_SIV};
pub use keys::{ArrayKeyProvider, KeyProvider};
pub use registry::DriverRegistry;
pub use service::{EncryptedValueResolver, Encryptor};
