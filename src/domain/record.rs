use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::blob_name::BlobName;
use super::transcript::Transcript;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// One archived transcription: upload metadata plus the transcript returned
/// to the client, joined to its audio blob through `audio_ref`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub id: RecordId,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
    pub audio_ref: String,
    pub transcription: Transcript,
}

impl HistoryRecord {
    pub fn new(
        id: RecordId,
        file_name: String,
        blob_name: &BlobName,
        transcription: Transcript,
    ) -> Self {
        Self {
            id,
            file_name,
            created_at: Utc::now(),
            audio_ref: format!("/history/audio/{}", blob_name),
            transcription,
        }
    }

    /// Stored blob name, recovered from the trailing path segment of
    /// `audio_ref`.
    pub fn blob_name(&self) -> &str {
        self.audio_ref
            .rsplit('/')
            .next()
            .unwrap_or(self.audio_ref.as_str())
    }
}
