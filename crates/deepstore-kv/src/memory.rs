//! In-memory key-value store for testing and ephemeral use.
//!
//! [`InMemoryKeyStore`] keeps all entries in a `HashMap` behind a `RwLock`.
//! It implements the full [`KeyStore`] trait, including the optional
//! `clear` capability, and exposes inspection helpers so tests can assert
//! on the raw flat entries the adapter writes.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{KvError, KvResult};
use crate::traits::KeyStore;

/// An in-memory implementation of [`KeyStore`].
///
/// All data lives in a `HashMap` behind a `RwLock` and is lost when the
/// store is dropped.
pub struct InMemoryKeyStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Returns `true` if an entry exists under `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().expect("lock poisoned").contains_key(key)
    }

    /// Return a sorted list of all keys in the store.
    pub fn keys(&self) -> Vec<String> {
        let map = self.entries.read().expect("lock poisoned");
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Return the raw stored string under `key`, if any.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().expect("lock poisoned").get(key).cloned()
    }
}

impl Default for InMemoryKeyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyStore for InMemoryKeyStore {
    async fn get(&self, key: &str) -> KvResult<Option<String>> {
        let map = self
            .entries
            .read()
            .map_err(|e| KvError::Backend(format!("lock poisoned: {e}")))?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> KvResult<()> {
        let mut map = self
            .entries
            .write()
            .map_err(|e| KvError::Backend(format!("lock poisoned: {e}")))?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> KvResult<()> {
        let mut map = self
            .entries
            .write()
            .map_err(|e| KvError::Backend(format!("lock poisoned: {e}")))?;
        map.remove(key);
        Ok(())
    }

    async fn clear(&self) -> KvResult<()> {
        let mut map = self
            .entries
            .write()
            .map_err(|e| KvError::Backend(format!("lock poisoned: {e}")))?;
        map.clear();
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryKeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryKeyStore")
            .field("entry_count", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Core operations
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn set_and_get() {
        let store = InMemoryKeyStore::new();
        store.set("a", "1").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some("1".to_string()));
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let store = InMemoryKeyStore::new();
        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_replaces_previous_value() {
        let store = InMemoryKeyStore::new();
        store.set("a", "1").await.unwrap();
        store.set("a", "2").await.unwrap();
        assert_eq!(store.get("a").await.unwrap(), Some("2".to_string()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn remove_is_idempotent() {
        let store = InMemoryKeyStore::new();
        store.set("a", "1").await.unwrap();
        store.remove("a").await.unwrap();
        store.remove("a").await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn clear_removes_all() {
        let store = InMemoryKeyStore::new();
        store.set("a", "1").await.unwrap();
        store.set("b", "2").await.unwrap();
        store.clear().await.unwrap();
        assert!(store.is_empty());
    }

    // -----------------------------------------------------------------------
    // Inspection helpers
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn keys_are_sorted() {
        let store = InMemoryKeyStore::new();
        store.set("b", "2").await.unwrap();
        store.set("a", "1").await.unwrap();
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn contains_key_and_raw() {
        let store = InMemoryKeyStore::new();
        store.set("a", "raw-value").await.unwrap();
        assert!(store.contains_key("a"));
        assert!(!store.contains_key("b"));
        assert_eq!(store.raw("a"), Some("raw-value".to_string()));
    }

    // -----------------------------------------------------------------------
    // Optional capability default
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn clear_default_is_unsupported() {
        // A store that does not override `clear` reports the capability
        // as missing.
        struct NoClear;

        #[async_trait]
        impl KeyStore for NoClear {
            async fn get(&self, _key: &str) -> KvResult<Option<String>> {
                Ok(None)
            }
            async fn set(&self, _key: &str, _value: &str) -> KvResult<()> {
                Ok(())
            }
            async fn remove(&self, _key: &str) -> KvResult<()> {
                Ok(())
            }
        }

        let err = NoClear.clear().await.unwrap_err();
        assert!(matches!(err, KvError::Unsupported("clear")));
    }

    #[test]
    fn debug_format() {
        let store = InMemoryKeyStore::new();
        let debug = format!("{store:?}");
        assert!(debug.contains("InMemoryKeyStore"));
        assert!(debug.contains("entry_count"));
    }
}
