//! AES-256-GCM driver, the service default.
//!
//! **Nonce handling:** GCM nonce reuse under the same key is catastrophic. A
//! random 96-bit nonce is generated on every call; it is never derived from
//! the plaintext or a counter.

use aes_gcm::Aes256Gcm;
use common::{EncryptorError, Key};

use super::{open, seal, Driver};

/// Registry name of [`Aes256GcmDriver`].
pub const AES_256_GCM: &str = "aes256gcm";

/// AES-256-GCM with a detached 128-bit tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes256GcmDriver;

impl Aes256GcmDriver {
    /// Create the driver. It holds no state.
    pub fn new() -> Self {
        Self
    }
}

impl Driver for Aes256GcmDriver {
    fn name(&self) -> &str {
        AES_256_GCM
    }

    fn encrypt(&self, plaintext: &[u8], key: &Key) -> Result<String, EncryptorError> {
        seal::<Aes256Gcm>(AES_256_GCM, plaintext, key)
    }

    fn decrypt(&self, ciphertext: &str, key: &Key) -> Result<Vec<u8>, EncryptorError> {
        open::<Aes256Gcm>(AES_256_GCM, ciphertext, key)
    }
}
