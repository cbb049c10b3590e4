use axum::Json;
use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::normalize_duration;
use crate::presentation::state::AppState;

use super::identity::{body_limit, content_type, forbidden, plain_error, session_user};
use super::mobile_record::{TokenParams, token_error_response};

#[derive(Debug, Serialize)]
pub struct MobileUploadResponse {
    pub post_id: String,
    pub file_id: String,
    pub permalink: String,
}

#[tracing::instrument(skip(state, headers, params, body))]
pub async fn mobile_upload_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<TokenParams>,
    body: Body,
) -> Response {
    let token = params.token.unwrap_or_default();
    let session = session_user(&headers);
    let grant = match state
        .mobile_uploads
        .authorize(&token, session.as_ref())
        .await
    {
        Ok(grant) => grant,
        Err(e) => return token_error_response(&e),
    };

    if session.is_none() {
        let origin = headers
            .get(header::ORIGIN)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .trim();
        if !state.site_url.is_allowed_origin(origin) {
            tracing::warn!(origin, "Rejected cross-origin mobile upload");
            return forbidden();
        }
    }

    if let Err(e) = state.mobile_uploads.ensure_member(&grant).await {
        return token_error_response(&e);
    }

    let limit = body_limit(state.config.snapshot().max_file_size_bytes());
    let data = match axum::body::to_bytes(body, limit).await {
        Ok(bytes) if !bytes.is_empty() => bytes.to_vec(),
        Ok(_) => return plain_error(StatusCode::BAD_REQUEST, "Failed to read audio data"),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read mobile upload body");
            return plain_error(StatusCode::BAD_REQUEST, "Failed to read audio data");
        }
    };

    let duration = normalize_duration(params.duration.as_deref());
    match state
        .mobile_uploads
        .upload(&token, grant, data, content_type(&headers), duration)
        .await
    {
        Ok(receipt) => {
            let mut response = (
                StatusCode::CREATED,
                Json(MobileUploadResponse {
                    post_id: receipt.post_id.to_string(),
                    file_id: receipt.file_id.to_string(),
                    permalink: receipt.permalink,
                }),
            )
                .into_response();
            response
                .headers_mut()
                .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
            response
        }
        Err(e) => token_error_response(&e),
    }
}
