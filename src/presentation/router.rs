use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::TranscriptionEngine;
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    delete_history_handler, get_audio_handler, health_handler, list_history_handler,
    transcribe_handler,
};
use crate::presentation::state::AppState;

/// Slack on top of the configured file limit for multipart framing and the
/// small text fields that ride along with the upload.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router<E>(state: AppState<E>) -> Router
where
    E: TranscriptionEngine + 'static + ?Sized,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.settings.upload.max_bytes() + MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health_handler::<E>))
        .route("/transcribe", post(transcribe_handler::<E>))
        .route("/history", get(list_history_handler::<E>))
        .route("/history/{id}", delete(delete_history_handler::<E>))
        .route("/history/audio/{name}", get(get_audio_handler::<E>))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
