use std::sync::Arc;

use crate::application::ports::TranscriptionEngine;
use crate::application::services::{HistoryService, TranscriptionService};
use crate::infrastructure::intake::UploadIntake;
use crate::presentation::config::Settings;

pub struct AppState<E>
where
    E: TranscriptionEngine + ?Sized,
{
    pub transcription: Arc<TranscriptionService<E>>,
    pub history: Arc<HistoryService>,
    pub intake: Arc<UploadIntake>,
    pub settings: Settings,
}

impl<E> Clone for AppState<E>
where
    E: TranscriptionEngine + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            transcription: Arc::clone(&self.transcription),
            history: Arc::clone(&self.history),
            intake: Arc::clone(&self.intake),
            settings: self.settings.clone(),
        }
    }
}
