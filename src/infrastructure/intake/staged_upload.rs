use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::AudioFormat;

/// Request-scoped staged copy of an upload.
///
/// The temp file is owned by this value and removed when it drops, so the
/// staged copy cannot outlive its request no matter which downstream step
/// fails.
pub struct StagedUpload {
    file: NamedTempFile,
    file_name: String,
    format: AudioFormat,
    size_bytes: u64,
}

impl StagedUpload {
    pub(super) fn new(
        file: NamedTempFile,
        file_name: String,
        format: AudioFormat,
        size_bytes: u64,
    ) -> Self {
        Self {
            file,
            file_name,
            format,
            size_bytes,
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Sanitized original file name.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn size_bytes(&self) -> u64 {
        self.size_bytes
    }
}
