//! Pluggable AEAD drivers.
//!
//! A [`Driver`] turns plaintext plus a caller-supplied [`Key`] into a
//! self-describing ciphertext token, and back. The built-in drivers share the
//! framing defined in [`wire`] and normalise every key to a 256-bit cipher key
//! with SHA-256, so keys of any length are accepted.
//!
//! | driver                 | name           | primitive                     |
//! |------------------------|----------------|-------------------------------|
//! | [`Aes256GcmDriver`]    | `aes256gcm`    | AES-256-GCM                   |
//! | [`Aes256GcmSivDriver`] | `aes256gcmsiv` | AES-256-GCM-SIV (RFC 8452)    |
//!
//! Every encryption draws a fresh 96-bit nonce from the OS CSPRNG.

pub mod gcm;
pub mod gcm_siv;
pub mod wire;

use aes_gcm::aead::{
    consts::{U12, U16},
    generic_array::GenericArray,
    rand_core::RngCore,
    AeadCore, AeadInPlace, KeyInit, OsRng,
};
use common::{EncryptorError, Key};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use wire::{Token, NONCE_LEN, TAG_LEN};

pub use gcm::{Aes256GcmDriver, AES_256_GCM};
pub use gcm_siv::{Aes256GcmSivDriver, AES_256_GCM_SIV};

/// Byte length of the normalised cipher key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// One authenticated-encryption algorithm behind a common interface.
///
/// Implementations must be stateless: the registry shares a single instance
/// across threads.
pub trait Driver: Send + Sync {
    /// Case-insensitive identifier the driver is registered under.
    fn name(&self) -> &str;

    /// Encrypt `plaintext` under `key`, returning a ciphertext token.
    fn encrypt(&self, plaintext: &[u8], key: &Key) -> Result<String, EncryptorError>;

    /// Decrypt a token produced by [`Driver::encrypt`] with the same `key`.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptorError::MalformedCiphertext`] for a token that cannot
    /// be parsed and [`EncryptorError::AuthenticationFailure`] when the tag
    /// does not verify.
    fn decrypt(&self, ciphertext: &str, key: &Key) -> Result<Vec<u8>, EncryptorError>;
}

/// Hash raw key material down to a fixed-size cipher key.
fn derive_cipher_key(key: &Key) -> Zeroizing<[u8; KEY_LEN]> {
    Zeroizing::new(Sha256::digest(key.as_bytes()).into())
}

/// AEAD primitives with the framing the built-in drivers share: 96-bit nonce,
/// detached 128-bit tag.
trait FramedAead: AeadInPlace + AeadCore<NonceSize = U12, TagSize = U16> + KeyInit {}

impl<C> FramedAead for C where
    C: AeadInPlace + AeadCore<NonceSize = U12, TagSize = U16> + KeyInit
{
}

/// Encrypt under a fresh random nonce and frame the result as a [`Token`].
/// `driver` names the primitive in error messages.
fn seal<C: FramedAead>(
    driver: &str,
    plaintext: &[u8],
    key: &Key,
) -> Result<String, EncryptorError> {
    let cipher = build_cipher::<C>(driver, key)?;

    let mut nonce = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce);

    let mut body = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(GenericArray::from_slice(&nonce), b"", &mut body)
        .map_err(|_| EncryptorError::EncryptionFailure(format!("{driver} seal failed")))?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);

    Ok(Token {
        nonce,
        tag: tag_bytes,
        body,
    }
    .encode())
}

/// Parse a [`Token`] and verify it under `key`.
fn open<C: FramedAead>(
    driver: &str,
    ciphertext: &str,
    key: &Key,
) -> Result<Vec<u8>, EncryptorError> {
    let Token { nonce, tag, mut body } = Token::parse(ciphertext)?;
    let cipher = build_cipher::<C>(driver, key)?;
    cipher
        .decrypt_in_place_detached(
            GenericArray::from_slice(&nonce),
            b"",
            &mut body,
            GenericArray::from_slice(&tag),
        )
        .map_err(|_| EncryptorError::AuthenticationFailure(driver.into()))?;
    Ok(body)
}

fn build_cipher<C: KeyInit>(driver: &str, key: &Key) -> Result<C, EncryptorError> {
    let derived = derive_cipher_key(key);
    C::new_from_slice(derived.as_slice())
        .map_err(|_| EncryptorError::UnsupportedPrimitive(format!("{driver} key init")))
}
