use std::time::Instant;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;
use serde::Serialize;

use crate::application::ports::TranscriptionEngine;
use crate::domain::Segment;
use crate::infrastructure::intake::IntakeError;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response shaping only; the engine invocation is identical either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResponseFormat {
    Plain,
    Verbose,
}

impl ResponseFormat {
    /// `plain` (and the legacy `text` spelling) selects the bare-text
    /// shape; anything else is verbose.
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "plain" | "text" => Self::Plain,
            _ => Self::Verbose,
        }
    }
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler<E>(
    State(state): State<AppState<E>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    E: TranscriptionEngine + 'static + ?Sized,
{
    let started = Instant::now();

    let mut upload: Option<(String, Bytes)> = None;
    let mut language: Option<String> = None;
    let mut response_format = ResponseFormat::Verbose;
    let mut save_to_history = false;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        };

        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = match field.bytes().await {
                    Ok(d) => d,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read file bytes");
                        return (
                            StatusCode::BAD_REQUEST,
                            Json(ErrorResponse {
                                error: format!("Failed to read file: {}", e),
                            }),
                        )
                            .into_response();
                    }
                };
                upload = Some((file_name, data));
            }
            Some("language") => {
                if let Ok(value) = field.text().await {
                    if !value.is_empty() {
                        language = Some(value);
                    }
                }
            }
            Some("response_format") => {
                if let Ok(value) = field.text().await {
                    response_format = ResponseFormat::parse(&value);
                }
            }
            Some("save_to_history") => {
                if let Ok(value) = field.text().await {
                    save_to_history = value.eq_ignore_ascii_case("true");
                }
            }
            _ => {}
        }
    }

    let Some((file_name, data)) = upload else {
        tracing::warn!("Transcription request with no file");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No file provided".to_string(),
            }),
        )
            .into_response();
    };

    // Staged file is removed on drop, on every exit path below.
    let staged = match state.intake.stage(&file_name, data.clone()).await {
        Ok(s) => s,
        Err(e) => return intake_error_response(e),
    };

    tracing::debug!(
        file_name = %staged.file_name(),
        bytes = staged.size_bytes(),
        language = ?language,
        "Starting transcription"
    );

    let transcript = match state
        .transcription
        .transcribe(staged.path(), language)
        .await
    {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "Transcription failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Transcription failed: {}", e),
                }),
            )
                .into_response();
        }
    };

    // Archiving is best-effort relative to the transcription contract: a
    // failed archive still returns the transcript, just without an id.
    let mut record_id = None;
    if save_to_history {
        match state
            .history
            .archive(staged.file_name(), data, transcript.clone())
            .await
        {
            Ok(record) => record_id = Some(record.id),
            Err(e) => {
                tracing::error!(error = %e, "Archiving failed, returning transcription without id");
            }
        }
    }

    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        archived = record_id.is_some(),
        "Transcription request completed"
    );

    let id = record_id.map(|id| id.to_string());
    let response = match response_format {
        ResponseFormat::Plain => TranscribeResponse {
            text: transcript.text,
            segments: None,
            language: None,
            id,
        },
        ResponseFormat::Verbose => TranscribeResponse {
            text: transcript.text,
            segments: Some(transcript.segments),
            language: transcript.language,
            id,
        },
    };

    (StatusCode::OK, Json(response)).into_response()
}

fn intake_error_response(error: IntakeError) -> axum::response::Response {
    let status = match &error {
        IntakeError::NoFileSelected | IntakeError::UnsupportedType(_) => StatusCode::BAD_REQUEST,
        IntakeError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        IntakeError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %error, "Failed to stage upload");
        return (
            status,
            Json(ErrorResponse {
                error: "Failed to stage upload".to_string(),
            }),
        )
            .into_response();
    }

    tracing::warn!(error = %error, "Rejected upload");
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}
