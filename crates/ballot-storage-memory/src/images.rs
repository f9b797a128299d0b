//! In-memory image store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ballot_core::{ImageStore, StorageResult};

/// Stored object: bytes plus content type.
#[derive(Debug, Clone)]
struct StoredImage {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory stand-in for an object store.
///
/// URLs are synthesized under a fixed base so handlers can round-trip them;
/// nothing actually serves the bytes.
#[derive(Default)]
pub struct InMemoryImageStore {
    objects: RwLock<HashMap<String, StoredImage>>,
}

impl InMemoryImageStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored bytes and content type for a key, if present.
    pub async fn get(&self, key: &str) -> Option<(Vec<u8>, String)> {
        self.objects
            .read()
            .await
            .get(key)
            .map(|o| (o.bytes.clone(), o.content_type.clone()))
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> StorageResult<String> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredImage {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("memory://images/{key}"))
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.objects.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete() {
        let store = InMemoryImageStore::new();

        let url = store
            .put("candidates/1.png", vec![0x89, 0x50], "image/png")
            .await
            .unwrap();
        assert_eq!(url, "memory://images/candidates/1.png");

        let (bytes, content_type) = store.get("candidates/1.png").await.unwrap();
        assert_eq!(bytes, vec![0x89, 0x50]);
        assert_eq!(content_type, "image/png");

        store.delete("candidates/1.png").await.unwrap();
        assert!(store.get("candidates/1.png").await.is_none());
    }

    #[tokio::test]
    async fn test_delete_absent_key_is_noop() {
        let store = InMemoryImageStore::new();
        store.delete("never-stored").await.unwrap();
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = InMemoryImageStore::new();
        store
            .put("k", vec![1], "image/png")
            .await
            .unwrap();
        store
            .put("k", vec![2, 3], "image/jpeg")
            .await
            .unwrap();

        let (bytes, content_type) = store.get("k").await.unwrap();
        assert_eq!(bytes, vec![2, 3]);
        assert_eq!(content_type, "image/jpeg");
    }
}
