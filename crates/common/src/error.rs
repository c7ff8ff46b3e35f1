//! Common error types shared across crates.

use thiserror::Error;

/// Errors produced by drivers, the driver registry, key providers and the
/// encryption service.
///
/// Each variant carries a stable machine-readable [`code`](Self::code) that is
/// safe to emit as a log field:
/// - [`EncryptorError::InvalidKey`] → `invalid_key`
/// - [`EncryptorError::UnknownDriver`] → `unknown_driver`
/// - [`EncryptorError::MalformedCiphertext`] → `malformed_ciphertext`
/// - [`EncryptorError::AuthenticationFailure`] → `authentication_failure`
/// - [`EncryptorError::UnsupportedPrimitive`] → `unsupported_primitive`
/// - [`EncryptorError::EncryptionFailure`] → `encryption_failure`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptorError {
    /// A key was required but is empty or absent.
    #[error("encryption key must be a non-empty string")]
    InvalidKey,

    /// No driver is registered under the requested name.
    #[error("unsupported encryptor driver \"{0}\"")]
    UnknownDriver(String),

    /// The ciphertext token does not follow the `nonce.tag.body` wire format.
    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// Tag verification failed: wrong key, tampered data, or a mismatched nonce/tag.
    #[error("{0} decryption failed: authentication tag mismatch")]
    AuthenticationFailure(String),

    /// The AEAD primitive could not be constructed for the given key material.
    #[error("unsupported cipher primitive: {0}")]
    UnsupportedPrimitive(String),

    /// The AEAD primitive refused to seal the plaintext.
    #[error("encryption failed: {0}")]
    EncryptionFailure(String),
}

impl EncryptorError {
    /// Short machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            EncryptorError::InvalidKey => "invalid_key",
            EncryptorError::UnknownDriver(_) => "unknown_driver",
            EncryptorError::MalformedCiphertext(_) => "malformed_ciphertext",
            EncryptorError::AuthenticationFailure(_) => "authentication_failure",
            EncryptorError::UnsupportedPrimitive(_) => "unsupported_primitive",
            EncryptorError::EncryptionFailure(_) => "encryption_failure",
        }
    }
}
