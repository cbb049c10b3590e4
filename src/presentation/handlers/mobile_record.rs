use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use crate::application::services::MobileUploadError;
use crate::presentation::pages::{MobileRecordPage, render_mobile_record_page};
use crate::presentation::state::AppState;

use super::identity::{forbidden, plain_error, session_user};

pub const RECORD_PAGE_CSP: &str = "default-src 'self'; style-src 'unsafe-inline'; script-src 'unsafe-inline'; connect-src 'self'; img-src 'self' data:; media-src 'self' blob: data:;";

#[derive(Debug, Deserialize)]
pub struct TokenParams {
    pub token: Option<String>,
    pub duration: Option<String>,
}

#[tracing::instrument(skip(state, headers, params))]
pub async fn mobile_record_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<TokenParams>,
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

    let channel_display = state
        .directory
        .channel_display_name(&grant.channel_id)
        .await
        .ok()
        .flatten()
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| grant.channel_id.to_string());

    let page = MobileRecordPage {
        channel_display,
        is_thread_reply: grant.root_id.as_ref().is_some_and(|r| !r.is_empty()),
        upload_url: state.site_url.mobile_upload_path(token.trim()),
        max_seconds: state.config.snapshot().max_recording_duration_seconds(),
    };

    let mut response = Html(render_mobile_record_page(&page)).into_response();
    let response_headers = response.headers_mut();
    response_headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response_headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    response_headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    response_headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    response_headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(RECORD_PAGE_CSP),
    );
    response
}

/// Shared by both token-authenticated endpoints.
pub(super) fn token_error_response(error: &MobileUploadError) -> Response {
    match error {
        MobileUploadError::MissingToken => plain_error(StatusCode::BAD_REQUEST, "missing token"),
        MobileUploadError::InvalidToken(e) => {
            tracing::debug!(error = %e, "Rejected mobile token");
            plain_error(StatusCode::UNAUTHORIZED, "token invalid or expired")
        }
        MobileUploadError::WrongUser => forbidden(),
        MobileUploadError::NotChannelMember => {
            plain_error(StatusCode::FORBIDDEN, "not a channel member")
        }
        MobileUploadError::Upload(e) => super::upload::upload_error_response(e),
    }
}
