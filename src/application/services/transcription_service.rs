use std::path::Path;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::application::ports::{
    EngineOptions, EngineOutput, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{Segment, Transcript};

/// Invokes the engine and reshapes raw output into the stable transcript
/// schema. Engine concurrency is bounded independently of HTTP concurrency:
/// invocations beyond the pool capacity queue on the semaphore rather than
/// spawning unbounded inference work.
pub struct TranscriptionService<E>
where
    E: TranscriptionEngine + ?Sized,
{
    engine: Arc<E>,
    permits: Arc<Semaphore>,
}

impl<E> TranscriptionService<E>
where
    E: TranscriptionEngine + ?Sized,
{
    pub fn new(engine: Arc<E>, max_concurrent: usize) -> Self {
        Self {
            engine,
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    pub async fn transcribe(
        &self,
        audio_path: &Path,
        language: Option<String>,
    ) -> Result<Transcript, TranscriptionServiceError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| TranscriptionServiceError::PoolClosed)?;

        let options = EngineOptions { language };
        let output = self.engine.transcribe(audio_path, &options).await?;

        Ok(normalize(output))
    }
}

/// Assigns zero-based sequential indices in emission order and trims
/// per-segment text. Engine-side segment ids may be unstable and are
/// discarded here.
fn normalize(output: EngineOutput) -> Transcript {
    let segments = output
        .segments
        .into_iter()
        .enumerate()
        .map(|(index, raw)| Segment {
            index,
            start: raw.start,
            end: raw.end,
            text: raw.text.trim().to_string(),
        })
        .collect();

    Transcript {
        text: output.text,
        segments,
        language: output.language,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionServiceError {
    #[error("transcription: {0}")]
    Engine(#[from] TranscriptionError),
    #[error("transcription pool closed")]
    PoolClosed,
}
