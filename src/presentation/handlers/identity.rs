use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::UserId;
use crate::infrastructure::observability::SESSION_USER_HEADER;

/// User id the host attached to an authenticated request, if any.
pub fn session_user(headers: &HeaderMap) -> Option<UserId> {
    headers
        .get(SESSION_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(UserId::new)
}

pub fn plain_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, message.into()).into_response()
}

pub fn unauthorized() -> Response {
    plain_error(StatusCode::UNAUTHORIZED, "Unauthorized")
}

pub fn forbidden() -> Response {
    plain_error(StatusCode::FORBIDDEN, "Forbidden")
}

/// Byte limit for `axum::body::to_bytes`.
pub fn body_limit(max_bytes: u64) -> usize {
    usize::try_from(max_bytes).unwrap_or(usize::MAX)
}

pub fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .trim()
        .to_string()
}
