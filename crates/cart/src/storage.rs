//! The cart's persistence medium.
//!
//! A key-value byte-string store addressable by a fixed key. In the
//! storefront this is the shopper's session; [`MemoryStorage`] backs tests
//! and anything else that needs a throwaway medium.

use std::collections::HashMap;

use crate::error::StorageError;

/// A key-value byte-string persistence medium for cart snapshots.
///
/// Reads and writes are synchronous and local; the store treats a write
/// failure as non-fatal (logged, the in-memory cart stays authoritative).
pub trait CartStorage {
    /// Read the snapshot stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be read.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write `bytes` under `key`, replacing any prior snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be written.
    fn store(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// An in-memory persistence medium.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    /// Create an empty medium.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a medium pre-seeded with a snapshot under `key`.
    #[must_use]
    pub fn with_entry(key: &str, bytes: Vec<u8>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), bytes);
        Self { entries }
    }

    /// Read back what is currently stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn store(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.load("k").unwrap(), None);

        storage.store("k", b"[]").unwrap();
        assert_eq!(storage.load("k").unwrap(), Some(b"[]".to_vec()));

        storage.store("k", b"[1]").unwrap();
        assert_eq!(storage.load("k").unwrap(), Some(b"[1]".to_vec()));
    }

    #[test]
    fn test_with_entry_seeds_snapshot() {
        let storage = MemoryStorage::with_entry("k", b"[]".to_vec());
        assert_eq!(storage.load("k").unwrap(), Some(b"[]".to_vec()));
    }
}
