use async_trait::async_trait;

use crate::domain::{HistoryRecord, RecordId};

/// Durable, ordered collection of history records. The newest-first
/// presentation order is the store's contract, not the caller's.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// All records, newest first. A missing or corrupt backing document
    /// degrades to an empty collection.
    async fn list(&self) -> Result<Vec<HistoryRecord>, HistoryRepositoryError>;

    /// Inserts at the head.
    async fn append(&self, record: HistoryRecord) -> Result<(), HistoryRepositoryError>;

    /// Removes at most one matching record, returning it so the caller can
    /// release the paired audio blob. `None` means no match; the caller
    /// decides whether that is a user-facing not-found.
    async fn remove(&self, id: &RecordId)
    -> Result<Option<HistoryRecord>, HistoryRepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryRepositoryError {
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error("write failed: {0}")]
    WriteFailed(String),
}
