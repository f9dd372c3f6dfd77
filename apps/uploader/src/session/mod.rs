//! Session-scoped key-value storage: survives a reload, not a new session.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::UploadError;

pub mod redis_store;

pub use redis_store::RedisSessionStore;

/// Key holding the last JSON-encoded parse result.
pub const RESULTS_KEY: &str = "resumeResults";

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, UploadError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), UploadError>;
    async fn remove(&self, key: &str) -> Result<(), UploadError>;
    /// Ends the session: every key is dropped.
    async fn clear(&self) -> Result<(), UploadError>;
}

/// Store whose session is the lifetime of the process. Clones share contents.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, UploadError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), UploadError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), UploadError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn clear(&self) -> Result<(), UploadError> {
        self.entries.write().await.clear();
        Ok(())
    }
}

#[async_trait]
impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    async fn get(&self, key: &str) -> Result<Option<String>, UploadError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), UploadError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), UploadError> {
        (**self).remove(key).await
    }

    async fn clear(&self) -> Result<(), UploadError> {
        (**self).clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_starts_empty() {
        let store = MemorySessionStore::new();
        assert_eq!(store.get(RESULTS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemorySessionStore::new();
        let reloaded = store.clone();
        store.set(RESULTS_KEY, "{}").await.unwrap();
        assert_eq!(reloaded.get(RESULTS_KEY).await.unwrap().as_deref(), Some("{}"));
    }

    #[tokio::test]
    async fn test_set_overwrites_and_remove_deletes() {
        let store = MemorySessionStore::new();
        store.set(RESULTS_KEY, "1").await.unwrap();
        store.set(RESULTS_KEY, "2").await.unwrap();
        assert_eq!(store.get(RESULTS_KEY).await.unwrap().as_deref(), Some("2"));
        store.remove(RESULTS_KEY).await.unwrap();
        assert_eq!(store.get(RESULTS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_ends_session() {
        let store: Box<dyn SessionStore> = Box::new(MemorySessionStore::new());
        store.set(RESULTS_KEY, "{}").await.unwrap();
        store.set("other", "x").await.unwrap();
        store.clear().await.unwrap();
        assert_eq!(store.get(RESULTS_KEY).await.unwrap(), None);
        assert_eq!(store.get("other").await.unwrap(), None);
    }
}
