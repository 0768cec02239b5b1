//! # Outbound Ports (Driven Ports)
//!
//! Capabilities the ledger engine requires from its host.
//!
//! Production: `FileBackedKVStore`, `Sha256IdentifierDeriver`
//! Testing: `InMemoryKVStore`, `FailingStore` (test-utils)

use crate::errors::StoreError;

/// Byte-oriented key-value store.
///
/// No cross-key transactions, no versioning, no secondary indexes. Each
/// `put` replaces the whole value under a key.
pub trait KeyValueStore {
    /// Get a value by key. `None` if the key was never written.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Put a single key-value pair.
    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.get(key)?.is_some())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        (**self).exists(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn exists(&self, key: &str) -> Result<bool, StoreError> {
        (**self).exists(key)
    }
}

/// Deterministic `string -> fixed-width identifier` function.
///
/// Identical input must always yield the identical identifier; collision
/// resistance is assumed by the ledger.
pub trait IdentifierDeriver {
    fn derive(&self, source: &str) -> String;
}
