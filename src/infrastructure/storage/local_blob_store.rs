use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{ObjectStore, PutPayload};

use crate::application::ports::{BlobStore, BlobStoreError};
use crate::domain::BlobName;

/// Archived audio blobs on the local filesystem.
///
/// Stored names are keyed by globally unique record ids, so concurrent
/// saves never target the same name; atomic single-file puts are the only
/// write discipline needed here.
pub struct LocalBlobStore {
    inner: Arc<LocalFileSystem>,
}

impl LocalBlobStore {
    pub fn new(base_path: PathBuf) -> Result<Self, BlobStoreError> {
        std::fs::create_dir_all(&base_path).map_err(BlobStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(base_path)
            .map_err(|e| BlobStoreError::WriteFailed(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(fs),
        })
    }
}

#[async_trait::async_trait]
impl BlobStore for LocalBlobStore {
    async fn save(&self, name: &BlobName, bytes: Bytes) -> Result<(), BlobStoreError> {
        let path = StorePath::from(name.as_str());
        self.inner
            .put(&path, PutPayload::from(bytes))
            .await
            .map_err(|e| BlobStoreError::WriteFailed(e.to_string()))?;

        Ok(())
    }

    async fn resolve(&self, reference: &str) -> Result<Option<String>, BlobStoreError> {
        let prefix = format!("{}_", BlobName::id_prefix(reference));

        // Linear scan of the storage area. Ids are globally unique, so at
        // most one entry carries the prefix.
        let mut entries = self.inner.list(None);
        let mut exact_match: Option<String> = None;

        while let Some(entry) = entries.next().await {
            let meta = entry.map_err(|e| BlobStoreError::ReadFailed(e.to_string()))?;
            let Some(stored_name) = meta.location.filename() else {
                continue;
            };

            if stored_name.starts_with(&prefix) {
                return Ok(Some(stored_name.to_string()));
            }
            if stored_name == reference {
                exact_match = Some(stored_name.to_string());
            }
        }

        Ok(exact_match)
    }

    async fn open(&self, stored_name: &str) -> Result<Vec<u8>, BlobStoreError> {
        let path = StorePath::from(stored_name);
        let result = self.inner.get(&path).await.map_err(|e| match e {
            object_store::Error::NotFound { .. } => BlobStoreError::NotFound(stored_name.to_string()),
            other => BlobStoreError::ReadFailed(other.to_string()),
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| BlobStoreError::ReadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, stored_name: &str) -> Result<bool, BlobStoreError> {
        let path = StorePath::from(stored_name);
        match self.inner.delete(&path).await {
            Ok(()) => Ok(true),
            Err(object_store::Error::NotFound { .. }) => Ok(false),
            Err(e) => Err(BlobStoreError::DeleteFailed(e.to_string())),
        }
    }
}
