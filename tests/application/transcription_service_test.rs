use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use murmur::application::ports::{
    EngineOptions, EngineOutput, RawSegment, TranscriptionEngine, TranscriptionError,
};
use murmur::application::services::TranscriptionService;

struct RaggedSegmentEngine;

#[async_trait::async_trait]
impl TranscriptionEngine for RaggedSegmentEngine {
    async fn transcribe(
        &self,
        _audio_path: &Path,
        options: &EngineOptions,
    ) -> Result<EngineOutput, TranscriptionError> {
        Ok(EngineOutput {
            text: "first second third".to_string(),
            language: options.language.clone(),
            segments: vec![
                RawSegment {
                    start: 0.0,
                    end: 1.0,
                    text: "  first ".to_string(),
                },
                RawSegment {
                    start: 1.0,
                    end: 2.5,
                    text: " second".to_string(),
                },
                RawSegment {
                    start: 2.5,
                    end: 4.0,
                    text: "third  ".to_string(),
                },
            ],
        })
    }
}

struct ProbeEngine {
    in_flight: AtomicUsize,
    max_in_flight: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl TranscriptionEngine for ProbeEngine {
    async fn transcribe(
        &self,
        _audio_path: &Path,
        _options: &EngineOptions,
    ) -> Result<EngineOutput, TranscriptionError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(25)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(EngineOutput {
            text: "done".to_string(),
            language: None,
            segments: Vec::new(),
        })
    }
}

#[tokio::test]
async fn given_raw_segments_when_normalizing_then_indices_are_sequential_and_text_trimmed() {
    let service = TranscriptionService::new(Arc::new(RaggedSegmentEngine), 2);

    let transcript = service
        .transcribe(Path::new("unused.wav"), None)
        .await
        .unwrap();

    let indices: Vec<usize> = transcript.segments.iter().map(|s| s.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);

    let texts: Vec<&str> = transcript.segments.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);

    for segment in &transcript.segments {
        assert!(segment.start <= segment.end);
    }
}

#[tokio::test]
async fn given_language_hint_when_transcribing_then_hint_reaches_engine() {
    let service = TranscriptionService::new(Arc::new(RaggedSegmentEngine), 2);

    let transcript = service
        .transcribe(Path::new("unused.wav"), Some("de".to_string()))
        .await
        .unwrap();

    assert_eq!(transcript.language.as_deref(), Some("de"));
}

#[tokio::test]
async fn given_single_permit_when_transcribing_concurrently_then_engine_runs_serially() {
    let max_in_flight = Arc::new(AtomicUsize::new(0));
    let engine = Arc::new(ProbeEngine {
        in_flight: AtomicUsize::new(0),
        max_in_flight: Arc::clone(&max_in_flight),
    });
    let service = Arc::new(TranscriptionService::new(engine, 1));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            service.transcribe(Path::new("unused.wav"), None).await
        }));
    }

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(max_in_flight.load(Ordering::SeqCst), 1);
}
