use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;
use uuid::Uuid;

use crate::application::ports::TranscriptionEngine;
use crate::domain::RecordId;
use crate::presentation::handlers::transcribe::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

#[tracing::instrument(skip(state))]
pub async fn list_history_handler<E>(State(state): State<AppState<E>>) -> impl IntoResponse
where
    E: TranscriptionEngine + 'static + ?Sized,
{
    match state.history.list().await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read history");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to read history".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[tracing::instrument(skip(state))]
pub async fn delete_history_handler<E>(
    State(state): State<AppState<E>>,
    Path(id): Path<String>,
) -> impl IntoResponse
where
    E: TranscriptionEngine + 'static + ?Sized,
{
    // Ids are UUIDs; anything else cannot name an existing record.
    let Ok(uuid) = Uuid::parse_str(&id) else {
        return not_found(&id);
    };

    match state.history.delete(&RecordId::from_uuid(uuid)).await {
        Ok(true) => (StatusCode::OK, Json(DeleteResponse { success: true })).into_response(),
        Ok(false) => not_found(&id),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete history item");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to delete history item".to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn not_found(id: &str) -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("History item not found: {}", id),
        }),
    )
        .into_response()
}
