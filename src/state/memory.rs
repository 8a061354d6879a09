//! In-process state store.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::state::{StateError, StateKey, StateStore};

/// A thread-safe map of key -> blob.
///
/// Clones share the same map, so a test can keep a handle and inspect what a
/// run wrote.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<DashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an existing blob.
    pub fn with_entry(self, key: &StateKey, value: impl Into<Vec<u8>>) -> Self {
        self.inner.insert(key.as_str().to_string(), value.into());
        self
    }

    /// Snapshot of a blob.
    pub fn peek(&self, key: &StateKey) -> Option<Vec<u8>> {
        self.inner.get(key.as_str()).map(|r| r.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn get(&self, key: &StateKey) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.peek(key))
    }

    async fn put(&self, key: &StateKey, value: &[u8]) -> Result<(), StateError> {
        self.inner.insert(key.as_str().to_string(), value.to_vec());
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_operations() {
        let store = MemoryStore::new();
        let key = StateKey::for_target("https://example.com/health");

        assert!(store.get(&key).await.unwrap().is_none());

        store.put(&key, b"200 OK").await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(b"200 OK".to_vec()));

        store.put(&key, b"502 Bad Gateway").await.unwrap();
        assert_eq!(store.peek(&key), Some(b"502 Bad Gateway".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let key = StateKey::for_target("https://example.com/");
        let store = MemoryStore::new().with_entry(&key, "200 OK");
        let handle = store.clone();

        store.put(&key, b"503 Service Unavailable").await.unwrap();
        assert_eq!(handle.peek(&key), Some(b"503 Service Unavailable".to_vec()));
    }
}
