use std::fmt;

use super::record::RecordId;

/// Stored name of an archived audio blob: `"<record id>_<file name>"`.
///
/// The record id is recoverable by taking the prefix before the first `_`,
/// and the original extension survives for MIME inference on retrieval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobName(String);

impl BlobName {
    pub fn new(record_id: &RecordId, file_name: &str) -> Self {
        Self(format!("{}_{}", record_id.as_uuid(), file_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Prefix of a stored name or bare reference up to the first `_`.
    /// For a reference with no separator this is the whole input.
    pub fn id_prefix(reference: &str) -> &str {
        reference.split('_').next().unwrap_or(reference)
    }
}

impl fmt::Display for BlobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
