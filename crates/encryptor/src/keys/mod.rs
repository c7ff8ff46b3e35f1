//! Key providers: the source of the current key and the retired keys that
//! are still accepted for decryption.
//!
//! [`KeyProvider::all_keys`] defines the rotation search order used by the
//! service: current key first, then previous keys newest to oldest.

pub mod array;

pub use array::ArrayKeyProvider;

use common::Key;

/// Supplies the current key and the ordered list of previous keys.
#[cfg_attr(test, mockall::automock)]
pub trait KeyProvider: Send + Sync {
    /// Key used for new encryptions.
    fn current_key(&self) -> Key;

    /// Retired keys, newest first. Never contains the current key.
    fn previous_keys(&self) -> Vec<Key>;

    /// Current key followed by every previous key.
    fn all_keys(&self) -> Vec<Key> {
        let mut keys = vec![self.current_key()];
        keys.extend(self.previous_keys());
        keys
    }
}
