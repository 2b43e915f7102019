use std::sync::Arc;

use bytes::Bytes;

use crate::application::ports::{
    BlobStore, BlobStoreError, HistoryRepository, HistoryRepositoryError,
};
use crate::domain::{BlobName, HistoryRecord, RecordId, Transcript};

/// Archival, listing, playback, and deletion of history records. A record
/// and its audio blob form a pair: created together at archive time and
/// deleted together.
pub struct HistoryService {
    history: Arc<dyn HistoryRepository>,
    blobs: Arc<dyn BlobStore>,
}

impl HistoryService {
    pub fn new(history: Arc<dyn HistoryRepository>, blobs: Arc<dyn BlobStore>) -> Self {
        Self { history, blobs }
    }

    /// Persists the original audio and appends a record referencing it.
    /// Blob writes are keyed by the freshly generated id, so concurrent
    /// archivals never collide on a stored name.
    pub async fn archive(
        &self,
        file_name: &str,
        audio: Bytes,
        transcription: Transcript,
    ) -> Result<HistoryRecord, HistoryServiceError> {
        let id = RecordId::new();
        let blob_name = BlobName::new(&id, file_name);

        self.blobs.save(&blob_name, audio).await?;

        let record = HistoryRecord::new(id, file_name.to_string(), &blob_name, transcription);

        if let Err(e) = self.history.append(record.clone()).await {
            // A failed append must not leave an orphan blob behind.
            if let Err(cleanup) = self.blobs.delete(blob_name.as_str()).await {
                tracing::warn!(
                    blob = %blob_name,
                    error = %cleanup,
                    "Failed to remove blob after history append failure"
                );
            }
            return Err(e.into());
        }

        Ok(record)
    }

    pub async fn list(&self) -> Result<Vec<HistoryRecord>, HistoryServiceError> {
        Ok(self.history.list().await?)
    }

    /// Deletes one record and its blob. Returns `false` without side
    /// effects when the id is unknown.
    pub async fn delete(&self, id: &RecordId) -> Result<bool, HistoryServiceError> {
        let Some(record) = self.history.remove(id).await? else {
            return Ok(false);
        };

        // Blob deletion is idempotent; a blob already gone still counts as
        // a successful pair removal.
        self.blobs.delete(record.blob_name()).await?;

        Ok(true)
    }

    /// Serves archived audio by bare record id or full stored name.
    pub async fn fetch_audio(
        &self,
        reference: &str,
    ) -> Result<Option<(String, Vec<u8>)>, HistoryServiceError> {
        let Some(stored_name) = self.blobs.resolve(reference).await? else {
            return Ok(None);
        };

        let bytes = self.blobs.open(&stored_name).await?;
        Ok(Some((stored_name, bytes)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryServiceError {
    #[error("history store: {0}")]
    Repository(#[from] HistoryRepositoryError),
    #[error("blob store: {0}")]
    Blob(#[from] BlobStoreError),
}
