//! Object-storage interface for candidate image assets.
//!
//! The server treats image storage as an external collaborator: candidates
//! reference an object key and a public URL, and this trait is the whole
//! surface the handlers consume.

use async_trait::async_trait;

use crate::StorageResult;

/// Object storage for candidate images.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Stores an object under `key` and returns its public URL.
    ///
    /// Overwriting an existing key replaces the object.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> StorageResult<String>;

    /// Deletes the object under `key`. Deleting an absent key is a no-op
    /// success.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}
