mod blob_store;
mod history_repository;
mod transcription_engine;

pub use blob_store::{BlobStore, BlobStoreError};
pub use history_repository::{HistoryRepository, HistoryRepositoryError};
pub use transcription_engine::{
    EngineOptions, EngineOutput, RawSegment, TranscriptionEngine, TranscriptionError,
};
