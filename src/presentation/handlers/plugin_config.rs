use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::presentation::state::AppState;

use super::identity::{session_user, unauthorized};

/// Settings the webapp needs to size the recorder and show transcript controls.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicConfigResponse {
    pub max_duration_seconds: u64,
    pub enable_transcription: bool,
    pub auto_transcribe: bool,
    pub transcription_max_duration: u64,
}

pub async fn plugin_config_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if session_user(&headers).is_none() {
        return unauthorized();
    }

    let config = state.config.snapshot();
    let response = PublicConfigResponse {
        max_duration_seconds: config.max_recording_duration_seconds(),
        enable_transcription: config.transcription_enabled(),
        auto_transcribe: config.auto_transcribe,
        transcription_max_duration: config.transcription_max_duration_seconds(),
    };
    (StatusCode::OK, Json(response)).into_response()
}
