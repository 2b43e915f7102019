use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::application::ports::{HistoryRepository, HistoryRepositoryError};
use crate::domain::{HistoryRecord, RecordId};

/// History records persisted as one ordered JSON document.
///
/// Every mutation is a full read-modify-write cycle serialized by a
/// single-writer lock, so two concurrent archivals cannot both read the same
/// prior state and silently overwrite each other. Reads take no lock: the
/// rename-based write protocol guarantees they never observe a partially
/// written document.
pub struct JsonHistoryRepository {
    document_path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonHistoryRepository {
    pub fn new(document_path: PathBuf) -> Result<Self, HistoryRepositoryError> {
        if let Some(parent) = document_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| HistoryRepositoryError::WriteFailed(e.to_string()))?;
        }

        Ok(Self {
            document_path,
            write_lock: Mutex::new(()),
        })
    }

    /// A missing or unparsable document degrades to an empty collection;
    /// new writes stay available instead of historical corruption becoming
    /// a hard error.
    async fn load(&self) -> Vec<HistoryRecord> {
        let raw = match tokio::fs::read(&self.document_path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read history document, serving empty history");
                return Vec::new();
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "History document is unparsable, serving empty history");
                Vec::new()
            }
        }
    }

    /// Writes the whole document to a sibling temp file and renames it over
    /// the live one. A crash mid-write leaves the previous document intact,
    /// never a truncated one.
    async fn persist(&self, records: &[HistoryRecord]) -> Result<(), HistoryRepositoryError> {
        let serialized = serde_json::to_vec(records)
            .map_err(|e| HistoryRepositoryError::Serialization(e.to_string()))?;

        let tmp_path = self
            .document_path
            .with_extension(format!("{}.tmp", Uuid::new_v4().simple()));

        tokio::fs::write(&tmp_path, &serialized)
            .await
            .map_err(|e| HistoryRepositoryError::WriteFailed(e.to_string()))?;

        if let Err(e) = tokio::fs::rename(&tmp_path, &self.document_path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(HistoryRepositoryError::WriteFailed(e.to_string()));
        }

        Ok(())
    }
}

#[async_trait]
impl HistoryRepository for JsonHistoryRepository {
    async fn list(&self) -> Result<Vec<HistoryRecord>, HistoryRepositoryError> {
        Ok(self.load().await)
    }

    async fn append(&self, record: HistoryRecord) -> Result<(), HistoryRepositoryError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await;
        records.insert(0, record);
        self.persist(&records).await
    }

    async fn remove(
        &self,
        id: &RecordId,
    ) -> Result<Option<HistoryRecord>, HistoryRepositoryError> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.load().await;
        let Some(position) = records.iter().position(|r| r.id == *id) else {
            return Ok(None);
        };

        let removed = records.remove(position);
        self.persist(&records).await?;

        Ok(Some(removed))
    }
}
