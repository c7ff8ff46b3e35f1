//! [`ArrayKeyProvider`]: an in-memory key set built once at startup.

use common::{EncryptorError, Key};

use super::KeyProvider;

/// Immutable key set: one current key plus unique previous keys.
///
/// Duplicates of the current key, and repeated previous keys, are dropped
/// silently while keeping first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayKeyProvider {
    current: Key,
    previous: Vec<Key>,
}

impl ArrayKeyProvider {
    /// Build a key set from validated keys.
    pub fn new(current: Key, previous: impl IntoIterator<Item = Key>) -> Self {
        let mut filtered: Vec<Key> = Vec::new();
        for key in previous {
            if key == current || filtered.contains(&key) {
                continue;
            }
            filtered.push(key);
        }
        Self {
            current,
            previous: filtered,
        }
    }

    /// Build a key set from raw key material.
    ///
    /// # Errors
    ///
    /// Returns [`EncryptorError::InvalidKey`] if the current key or any
    /// previous key is empty.
    pub fn from_raw<I, K>(current: impl Into<Vec<u8>>, previous: I) -> Result<Self, EncryptorError>
    where
        I: IntoIterator<Item = K>,
        K: Into<Vec<u8>>,
    {
        let current = Key::new(current)?;
        let previous = previous
            .into_iter()
            .map(Key::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(current, previous))
    }

    /// Build the next key set: `new_current` becomes current and the present
    /// current key moves to the front of the previous keys.
    pub fn rotate(&self, new_current: Key) -> Self {
        let previous = std::iter::once(self.current.clone()).chain(self.previous.iter().cloned());
        Self::new(new_current, previous)
    }
}

impl KeyProvider for ArrayKeyProvider {
    fn current_key(&self) -> Key {
        self.current.clone()
    }

    fn previous_keys(&self) -> Vec<Key> {
        self.previous.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(raw: &[&str]) -> Vec<Key> {
        raw.iter().map(|k| Key::new(*k).unwrap()).collect()
    }

    #[test]
    fn exposes_current_and_previous_keys() {
        let provider = ArrayKeyProvider::from_raw("key-current", ["key-prev-1", "key-prev-2"]).unwrap();
        assert_eq!(provider.current_key(), Key::new("key-current").unwrap());
        assert_eq!(provider.previous_keys(), keys(&["key-prev-1", "key-prev-2"]));
        assert_eq!(
            provider.all_keys(),
            keys(&["key-current", "key-prev-1", "key-prev-2"])
        );
    }

    #[test]
    fn rejects_empty_current_key() {
        let result = ArrayKeyProvider::from_raw("", Vec::<String>::new());
        assert_eq!(result.err(), Some(EncryptorError::InvalidKey));
    }

    #[test]
    fn rejects_empty_previous_key() {
        let result = ArrayKeyProvider::from_raw("current", ["old", ""]);
        assert_eq!(result.err(), Some(EncryptorError::InvalidKey));
    }

    #[test]
    fn drops_duplicates_preserving_first_seen_order() {
        let provider =
            ArrayKeyProvider::from_raw("k1", ["k2", "k1", "k3", "k2", "k4", "k3"]).unwrap();
        assert_eq!(provider.previous_keys(), keys(&["k2", "k3", "k4"]));
        assert_eq!(provider.all_keys(), keys(&["k1", "k2", "k3", "k4"]));
    }

    #[test]
    fn no_previous_keys() {
        let provider = ArrayKeyProvider::new(Key::new("only").unwrap(), []);
        assert!(provider.previous_keys().is_empty());
        assert_eq!(provider.all_keys(), keys(&["only"]));
    }

    #[test]
    fn rotate_moves_current_into_previous() {
        let provider = ArrayKeyProvider::from_raw("k2", ["k1"]).unwrap();
        let rotated = provider.rotate(Key::new("k3").unwrap());
        assert_eq!(rotated.all_keys(), keys(&["k3", "k2", "k1"]));
        // The original set is untouched.
        assert_eq!(provider.all_keys(), keys(&["k2", "k1"]));
    }

    #[test]
    fn rotate_to_a_retired_key_promotes_it() {
        let provider = ArrayKeyProvider::from_raw("k2", ["k1"]).unwrap();
        let rotated = provider.rotate(Key::new("k1").unwrap());
        assert_eq!(rotated.all_keys(), keys(&["k1", "k2"]));
    }

    #[test]
    fn debug_output_redacts_keys() {
        let provider = ArrayKeyProvider::from_raw("visible?", ["old-secret"]).unwrap();
        let rendered = format!("{provider:?}");
        assert!(!rendered.contains("visible?"));
        assert!(!rendered.contains("old-secret"));
    }
}
