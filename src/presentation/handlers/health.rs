use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::domain::PLUGIN_ID;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub plugin_id: &'static str,
    pub version: &'static str,
}

/// Liveness probe; also reports which plugin build is answering.
pub async fn health_handler() -> impl IntoResponse {
    let body = HealthResponse {
        status: "healthy",
        plugin_id: PLUGIN_ID,
        version: env!("CARGO_PKG_VERSION"),
    };
    (StatusCode::OK, Json(body))
}
