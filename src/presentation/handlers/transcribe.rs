use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::TranscribePostError;
use crate::domain::{PostId, mask_secret};
use crate::presentation::state::AppState;

use super::identity::{forbidden, plain_error, session_user, unauthorized};

#[derive(Debug, Deserialize)]
pub struct TranscribeParams {
    pub post_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
    pub cached: bool,
}

#[derive(Debug, Serialize)]
pub struct TranscribeFailure {
    pub error: &'static str,
    pub detail: String,
}

#[tracing::instrument(skip(state, headers))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<TranscribeParams>,
) -> Response {
    let Some(user_id) = session_user(&headers) else {
        return unauthorized();
    };
    if !state.transcription.is_enabled() {
        return plain_error(StatusCode::FORBIDDEN, "Transcription is disabled");
    }
    let Some(post_id) = params
        .post_id
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PostId::new)
    else {
        return plain_error(StatusCode::BAD_REQUEST, "post_id required");
    };

    match state.transcription.transcribe_post(&user_id, &post_id).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(TranscribeResponse {
                transcript: outcome.transcript,
                cached: outcome.cached,
            }),
        )
            .into_response(),
        Err(TranscribePostError::Disabled) => {
            plain_error(StatusCode::FORBIDDEN, "Transcription is disabled")
        }
        Err(TranscribePostError::PostNotFound(_)) => {
            plain_error(StatusCode::NOT_FOUND, "Post not found")
        }
        Err(TranscribePostError::NotVoiceMessage(_)) => {
            plain_error(StatusCode::BAD_REQUEST, "Not a voice message")
        }
        Err(TranscribePostError::Forbidden(_)) => forbidden(),
        Err(e @ TranscribePostError::TooLong { .. }) => {
            plain_error(StatusCode::BAD_REQUEST, e.to_string())
        }
        Err(TranscribePostError::AudioUnavailable(_)) => {
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read audio file")
        }
        Err(TranscribePostError::Transcription(e)) => {
            let api_key = state.config.snapshot().api_key().to_string();
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(TranscribeFailure {
                    error: e.user_message(),
                    detail: mask_secret(&e.to_string(), &api_key),
                }),
            )
                .into_response()
        }
    }
}
