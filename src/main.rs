use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use murmur::application::services::{HistoryService, TranscriptionService};
use murmur::infrastructure::audio::{TranscriptionEngineFactory, TranscriptionProvider};
use murmur::infrastructure::history::JsonHistoryRepository;
use murmur::infrastructure::intake::UploadIntake;
use murmur::infrastructure::observability::{TracingConfig, init_tracing};
use murmur::infrastructure::storage::LocalBlobStore;
use murmur::presentation::{AppState, EngineProviderSetting, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env();

    init_tracing(TracingConfig::default(), settings.server.port);

    let provider = match settings.engine.provider {
        EngineProviderSetting::Local => TranscriptionProvider::Local,
        EngineProviderSetting::OpenAi => TranscriptionProvider::OpenAi,
    };

    let engine = TranscriptionEngineFactory::create(
        provider,
        &settings.engine.model,
        settings.engine.api_key.clone(),
        settings.engine.base_url.clone(),
    )?;

    let history_repository = Arc::new(JsonHistoryRepository::new(
        settings.storage.document_path(),
    )?);
    let blob_store = Arc::new(LocalBlobStore::new(settings.storage.audio_dir())?);

    let transcription = Arc::new(TranscriptionService::new(
        engine,
        settings.engine.max_concurrent,
    ));
    let history = Arc::new(HistoryService::new(history_repository, blob_store));
    let intake = Arc::new(UploadIntake::new(settings.upload.max_file_size_mb));

    let state = AppState {
        transcription,
        history,
        intake,
        settings: settings.clone(),
    };

    let router = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], settings.server.port));
    tracing::info!(model = %settings.engine.model, "Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
