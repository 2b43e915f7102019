mod history_service;
mod transcription_service;

pub use history_service::{HistoryService, HistoryServiceError};
pub use transcription_service::{TranscriptionService, TranscriptionServiceError};
