use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use crate::application::ports::TranscriptionEngine;
use crate::domain::AudioFormat;
use crate::presentation::handlers::transcribe::ErrorResponse;
use crate::presentation::state::AppState;

/// Serves archived audio bytes. The path segment may be a full stored name
/// or just the record id; resolution handles both.
#[tracing::instrument(skip(state))]
pub async fn get_audio_handler<E>(
    State(state): State<AppState<E>>,
    Path(name): Path<String>,
) -> impl IntoResponse
where
    E: TranscriptionEngine + 'static + ?Sized,
{
    match state.history.fetch_audio(&name).await {
        Ok(Some((stored_name, bytes))) => {
            let mime = AudioFormat::mime_for_stored(&stored_name);
            tracing::debug!(stored_name = %stored_name, mime = %mime, "Serving audio blob");
            ([(header::CONTENT_TYPE, mime)], bytes).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Audio file not found".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to fetch audio blob");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch audio".to_string(),
                }),
            )
                .into_response()
        }
    }
}
