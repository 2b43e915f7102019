use async_trait::async_trait;

use bytes::Bytes;

use crate::domain::BlobName;

/// Persistence for archived audio bytes. The store exclusively owns blob
/// lifetime; no other component writes to its storage area.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn save(&self, name: &BlobName, bytes: Bytes) -> Result<(), BlobStoreError>;

    /// Resolves a bare record id or a full stored name to the stored name,
    /// scanning for an `"<id>_"` prefix first and falling back to an exact
    /// match. `None` when nothing matches.
    async fn resolve(&self, reference: &str) -> Result<Option<String>, BlobStoreError>;

    async fn open(&self, stored_name: &str) -> Result<Vec<u8>, BlobStoreError>;

    /// Removes the blob if present. Deleting a missing blob is a no-op
    /// returning `false`, mirroring filesystem re-deletion semantics.
    async fn delete(&self, stored_name: &str) -> Result<bool, BlobStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlobStoreError {
    #[error("write failed: {0}")]
    WriteFailed(String),
    #[error("blob not found: {0}")]
    NotFound(String),
    #[error("read failed: {0}")]
    ReadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
