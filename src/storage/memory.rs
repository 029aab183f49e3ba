//! In-memory bucket for tests and `STORE_BACKEND=memory` runs.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{ObjectStorage, StorageError, validate_key};

/// A stored object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Raw bytes.
    pub bytes: Vec<u8>,
    /// MIME type given at upload.
    pub content_type: String,
}

/// Bucket backed by a map from key to object.
#[derive(Debug, Default)]
pub struct MemoryObjectStorage {
    objects: RwLock<HashMap<String, StoredObject>>,
    public_base: String,
    reject_removals: AtomicBool,
}

impl MemoryObjectStorage {
    /// Creates an empty bucket whose public URLs start with `public_base`.
    #[must_use]
    pub fn new(public_base: &str) -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            public_base: public_base.trim_end_matches('/').to_string(),
            reject_removals: AtomicBool::new(false),
        }
    }

    /// Makes every following `remove` fail with an I/O error, leaving the
    /// objects in place, until switched off again.
    pub fn reject_removals(&self, reject: bool) {
        self.reject_removals.store(reject, Ordering::SeqCst);
    }

    /// Returns a copy of the object stored under `key`.
    pub async fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().await.get(key).cloned()
    }

    /// Returns every stored key, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn upload(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        let mut objects = self.objects.write().await;
        if objects.contains_key(key) {
            return Err(StorageError::AlreadyExists(key.to_string()));
        }
        objects.insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn remove(&self, keys: &[String]) -> Result<(), StorageError> {
        for key in keys {
            validate_key(key)?;
        }
        if self.reject_removals.load(Ordering::SeqCst) {
            return Err(StorageError::Io(std::io::Error::other("bucket removal rejected")));
        }
        let mut objects = self.objects.write().await;
        for key in keys {
            objects.remove(key);
        }
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{key}", self.public_base)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn upload_then_remove() {
        let storage = MemoryObjectStorage::new("http://cdn/gallery/");
        assert!(storage.upload("gallery/a.jpg", b"x", "image/jpeg").await.is_ok());
        assert_eq!(storage.keys().await, vec!["gallery/a.jpg".to_string()]);
        assert_eq!(storage.public_url("gallery/a.jpg"), "http://cdn/gallery/gallery/a.jpg");

        assert!(storage.remove(&["gallery/a.jpg".to_string()]).await.is_ok());
        assert!(storage.get("gallery/a.jpg").await.is_none());
    }

    #[tokio::test]
    async fn duplicate_upload_is_rejected() {
        let storage = MemoryObjectStorage::new("http://cdn");
        let _ = storage.upload("gallery/a.jpg", b"x", "image/jpeg").await;
        let again = storage.upload("gallery/a.jpg", b"y", "image/jpeg").await;
        assert!(matches!(again, Err(StorageError::AlreadyExists(_))));
        let stored = storage.get("gallery/a.jpg").await.map(|o| o.bytes);
        assert_eq!(stored, Some(b"x".to_vec()));
    }

    #[tokio::test]
    async fn rejected_removal_keeps_objects() {
        let storage = MemoryObjectStorage::new("http://cdn");
        let _ = storage.upload("gallery/a.jpg", b"x", "image/jpeg").await;
        storage.reject_removals(true);
        let result = storage.remove(&["gallery/a.jpg".to_string()]).await;
        assert!(matches!(result, Err(StorageError::Io(_))));
        assert!(storage.get("gallery/a.jpg").await.is_some());

        storage.reject_removals(false);
        assert!(storage.remove(&["gallery/a.jpg".to_string()]).await.is_ok());
        assert!(storage.keys().await.is_empty());
    }
}
