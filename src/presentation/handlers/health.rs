use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::TranscriptionEngine;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

pub async fn health_handler<E>(State(state): State<AppState<E>>) -> impl IntoResponse
where
    E: TranscriptionEngine + 'static + ?Sized,
{
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            model: state.settings.engine.model.clone(),
        }),
    )
}
