//! Common types and errors shared across the encryptor workspace crates.

pub mod error;
pub mod key;
pub mod value;

pub use error::EncryptorError;
pub use key::Key;
pub use value::EncryptedValue;
