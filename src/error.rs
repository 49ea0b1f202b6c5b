use std::fmt;

use thiserror::Error;

/// Returned by [`Tree::insert`][crate::avl::Tree::insert] when the key is already stored. The
/// tree is left untouched and the rejected key is handed back.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("key {key:?} is already present in the tree")]
pub struct DuplicateKeyError<K: fmt::Debug> {
    key: K,
}

impl<K: fmt::Debug> DuplicateKeyError<K> {
    pub(crate) fn new(key: K) -> Self {
        Self { key }
    }

    /// The key that was rejected.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Gives the rejected key back to the caller.
    pub fn into_key(self) -> K {
        self.key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_names_the_key() {
        let error = DuplicateKeyError::new(-7);
        assert_eq!(error.to_string(), "key -7 is already present in the tree");
        assert_eq!(error.into_key(), -7);
    }
}
