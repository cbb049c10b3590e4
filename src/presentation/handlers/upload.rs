use axum::Json;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::services::{UploadError, VoiceUpload};
use crate::domain::{ChannelId, PostId, normalize_duration};
use crate::presentation::state::AppState;

use super::identity::{body_limit, content_type, forbidden, plain_error, session_user, unauthorized};

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub channel_id: Option<String>,
    pub root_id: Option<String>,
    pub duration: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub post_id: String,
    pub file_id: String,
}

#[tracing::instrument(skip(state, headers, body))]
pub async fn upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<UploadParams>,
    body: Body,
) -> Response {
    let Some(user_id) = session_user(&headers) else {
        return unauthorized();
    };
    if !state.access.is_user_allowed(&user_id).await {
        return forbidden();
    }

    let Some(channel_id) = params
        .channel_id
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(ChannelId::new)
    else {
        return plain_error(StatusCode::BAD_REQUEST, "channel_id required");
    };

    let is_member = state
        .directory
        .is_channel_member(&channel_id, &user_id)
        .await
        .unwrap_or(false);
    if !is_member {
        return forbidden();
    }

    let limit = body_limit(state.config.snapshot().max_file_size_bytes());
    let data = match axum::body::to_bytes(body, limit).await {
        Ok(bytes) if !bytes.is_empty() => bytes.to_vec(),
        Ok(_) => return plain_error(StatusCode::BAD_REQUEST, "Failed to read audio data"),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read upload body");
            return plain_error(StatusCode::BAD_REQUEST, "Failed to read audio data");
        }
    };

    let root_id = params
        .root_id
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(PostId::new);

    let upload = VoiceUpload {
        user_id,
        channel_id,
        root_id,
        duration: normalize_duration(params.duration.as_deref()),
        mime_type: content_type(&headers),
        data,
    };

    match state.uploads.upload(upload).await {
        Ok(uploaded) => (
            StatusCode::CREATED,
            Json(UploadResponse {
                post_id: uploaded.post.id.to_string(),
                file_id: uploaded.file_id.to_string(),
            }),
        )
            .into_response(),
        Err(e) => upload_error_response(&e),
    }
}

pub(super) fn upload_error_response(error: &UploadError) -> Response {
    match error {
        UploadError::EmptyAudio => {
            plain_error(StatusCode::BAD_REQUEST, "Failed to read audio data")
        }
        UploadError::FileStorage(e) => {
            tracing::error!(error = %e, "Upload failed");
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, "Upload failed")
        }
        UploadError::PostCreation(e) => {
            tracing::error!(error = %e, "Failed to create post");
            plain_error(StatusCode::INTERNAL_SERVER_ERROR, "Failed to create post")
        }
    }
}
