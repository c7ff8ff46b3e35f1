//! [`Key`]: non-empty secret key material.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::EncryptorError;

/// Opaque, non-empty key material supplied by callers or a key provider.
///
/// The raw bytes are used as-is; drivers normalise them into a fixed-size
/// cipher key. When this type is dropped the buffer is overwritten with zeroes.
#[derive(Clone, PartialEq, Eq)]
pub struct Key(Box<[u8]>);

impl Key {
    /// Wrap raw key material.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptorError::InvalidKey`] if `material` is empty.
    pub fn new(material: impl Into<Vec<u8>>) -> Result<Self, EncryptorError> {
        let bytes = material.into();
        if bytes.is_empty() {
            return Err(EncryptorError::InvalidKey);
        }
        Ok(Self(bytes.into_boxed_slice()))
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Length of the raw key material in bytes. Never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&str> for Key {
    type Error = EncryptorError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Key {
    type Error = EncryptorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = EncryptorError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl Drop for Key {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl ZeroizeOnDrop for Key {}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Key([REDACTED])")
    }
}
