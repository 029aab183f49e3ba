//! Object storage for gallery uploads.
//!
//! The [`ObjectStorage`] trait is the bucket seam: upload without
//! overwriting, resolve a public URL, remove by key. [`LocalObjectStorage`]
//! writes under a directory that the HTTP server also serves read-only;
//! [`MemoryObjectStorage`] keeps objects in a map.

pub mod local;
pub mod memory;

use std::fmt;

use async_trait::async_trait;

pub use local::LocalObjectStorage;
pub use memory::MemoryObjectStorage;

use crate::error::AdminError;

/// Failures raised by an object storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// An object already exists under the key; uploads never overwrite.
    #[error("object already exists: {0}")]
    AlreadyExists(String),

    /// The key is empty, absolute, or escapes the bucket.
    #[error("invalid object key: {0}")]
    InvalidKey(String),

    /// Filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for AdminError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

/// A binary-object bucket.
#[async_trait]
pub trait ObjectStorage: Send + Sync + fmt::Debug {
    /// Stores `bytes` under `key`.
    ///
    /// # Errors
    ///
    /// [`StorageError::AlreadyExists`] if the key is taken,
    /// [`StorageError::InvalidKey`] for malformed keys, I/O errors otherwise.
    async fn upload(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<(), StorageError>;

    /// Removes every listed key. Missing keys are ignored.
    ///
    /// # Errors
    ///
    /// [`StorageError::InvalidKey`] for malformed keys, I/O errors otherwise.
    async fn remove(&self, keys: &[String]) -> Result<(), StorageError>;

    /// Public URL under which `key` is served.
    fn public_url(&self, key: &str) -> String;
}

/// Rejects keys that are empty, absolute, or contain `..` / empty segments.
///
/// # Errors
///
/// Returns [`StorageError::InvalidKey`] for any such key.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if bad {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
