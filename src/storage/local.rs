//! Local-disk bucket.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use super::{ObjectStorage, StorageError, validate_key};

/// Bucket stored as a directory tree: `<root>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    bucket_dir: PathBuf,
    public_base: String,
}

impl LocalObjectStorage {
    /// Creates a bucket rooted at `root/bucket`, publicly reachable at
    /// `public_base_url/bucket`.
    #[must_use]
    pub fn new(root: &Path, bucket: &str, public_base_url: &str) -> Self {
        Self {
            bucket_dir: root.join(bucket),
            public_base: format!("{}/{bucket}", public_base_url.trim_end_matches('/')),
        }
    }

    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.bucket_dir.join(key))
    }
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => StorageError::AlreadyExists(key.to_string()),
                _ => StorageError::Io(e),
            })?;
        file.write_all(bytes).await?;
        file.flush().await?;

        tracing::debug!(key, content_type, size = bytes.len(), "object stored");
        Ok(())
    }

    async fn remove(&self, keys: &[String]) -> Result<(), StorageError> {
        for key in keys {
            let path = self.resolve(key)?;
            match tokio::fs::remove_file(&path).await {
                Ok(()) => tracing::debug!(key = %key, "object removed"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
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

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("washbay-storage-{}", uuid::Uuid::new_v4()))
    }

    #[tokio::test]
    async fn upload_writes_file_under_bucket() {
        let root = temp_root();
        let storage = LocalObjectStorage::new(&root, "gallery", "http://localhost:3000/storage/");

        let result = storage.upload("gallery/a.png", b"png-bytes", "image/png").await;
        assert!(result.is_ok());

        let Ok(stored) = tokio::fs::read(root.join("gallery/gallery/a.png")).await else {
            panic!("file should exist");
        };
        assert_eq!(stored, b"png-bytes");
        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn upload_never_overwrites() {
        let root = temp_root();
        let storage = LocalObjectStorage::new(&root, "gallery", "http://cdn");

        assert!(storage.upload("gallery/a.png", b"one", "image/png").await.is_ok());
        let second = storage.upload("gallery/a.png", b"two", "image/png").await;
        assert!(matches!(second, Err(StorageError::AlreadyExists(_))));
        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[tokio::test]
    async fn remove_ignores_missing_objects() {
        let root = temp_root();
        let storage = LocalObjectStorage::new(&root, "gallery", "http://cdn");
        let _ = storage.upload("gallery/a.png", b"one", "image/png").await;

        let keys = vec!["gallery/a.png".to_string(), "gallery/missing.png".to_string()];
        assert!(storage.remove(&keys).await.is_ok());
        assert!(!root.join("gallery/gallery/a.png").exists());
        let _ = tokio::fs::remove_dir_all(&root).await;
    }

    #[test]
    fn public_url_joins_base_bucket_and_key() {
        let storage = LocalObjectStorage::new(Path::new("/srv"), "gallery", "http://cdn/storage/");
        assert_eq!(
            storage.public_url("gallery/x.jpg"),
            "http://cdn/storage/gallery/gallery/x.jpg"
        );
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let storage = LocalObjectStorage::new(&temp_root(), "gallery", "http://cdn");
        let result = storage.upload("../escape.jpg", b"x", "image/jpeg").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }
}
