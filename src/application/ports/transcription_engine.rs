use std::path::Path;

use async_trait::async_trait;

/// External speech-to-text engine, invoked as a black box on a staged
/// audio file. Implementations are expensive and idempotent-but-costly;
/// callers decide about retries, never the engine itself.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio_path: &Path,
        options: &EngineOptions,
    ) -> Result<EngineOutput, TranscriptionError>;
}

#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Language hint forwarded to the engine only when the caller supplied
    /// one; `None` leaves detection to the engine.
    pub language: Option<String>,
}

/// Raw engine output before normalization. Segment ordering follows
/// emission order; ids are assigned downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineOutput {
    pub text: String,
    pub language: Option<String>,
    pub segments: Vec<RawSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawSegment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("audio decoding failed: {0}")]
    DecodingFailed(String),
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("unsupported audio format: {0}")]
    UnsupportedFormat(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
