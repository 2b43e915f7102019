use bytes::Bytes;
use tempfile::Builder;

use crate::domain::AudioFormat;

use super::staged_upload::StagedUpload;

/// Validates an uploaded file and stages it to a private temporary location
/// for the engine to read.
pub struct UploadIntake {
    max_bytes: u64,
}

impl UploadIntake {
    pub fn new(max_file_size_mb: usize) -> Self {
        Self {
            max_bytes: max_file_size_mb as u64 * 1024 * 1024,
        }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Rejections happen before anything touches the filesystem; only a
    /// valid upload is written out.
    pub async fn stage(&self, file_name: &str, bytes: Bytes) -> Result<StagedUpload, IntakeError> {
        let sanitized = sanitize_file_name(file_name);
        if sanitized.is_empty() {
            return Err(IntakeError::NoFileSelected);
        }

        let Some(format) = AudioFormat::from_file_name(&sanitized) else {
            return Err(IntakeError::UnsupportedType(sanitized));
        };

        let size_bytes = bytes.len() as u64;
        if size_bytes > self.max_bytes {
            return Err(IntakeError::PayloadTooLarge {
                size_bytes,
                max_bytes: self.max_bytes,
            });
        }

        // Keep the extension on the staged name so engines can infer the
        // container format from the path alone.
        let extension = sanitized
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let file = Builder::new()
            .prefix("upload-")
            .suffix(&format!(".{}", extension))
            .tempfile()?;

        tokio::fs::write(file.path(), &bytes).await?;

        tracing::debug!(
            file_name = %sanitized,
            bytes = size_bytes,
            staged_path = %file.path().display(),
            "Upload staged"
        );

        Ok(StagedUpload::new(file, sanitized, format, size_bytes))
    }
}

/// Keeps the base name only; path separators and control characters never
/// reach the filesystem.
fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();

    base.chars().filter(|c| !c.is_control()).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("no file selected")]
    NoFileSelected,
    #[error("file type not allowed: {0}. Allowed types: mp3, wav, mp4, m4a, ogg")]
    UnsupportedType(String),
    #[error("file of {size_bytes} bytes exceeds the maximum upload size of {max_bytes} bytes")]
    PayloadTooLarge { size_bytes: u64, max_bytes: u64 },
    #[error("staging failed: {0}")]
    Io(#[from] std::io::Error),
}
