use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, mobile_record_handler, mobile_upload_handler, plugin_config_handler,
    transcribe_handler, upload_handler,
};
use crate::presentation::state::AppState;

/// Routes as seen after the host strips `/plugins/<id>`.
pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/config", get(plugin_config_handler))
        .route("/api/v1/upload", post(upload_handler))
        .route("/api/v1/mobile/upload", post(mobile_upload_handler))
        .route("/api/v1/transcribe", post(transcribe_handler))
        .route("/mobile/record", get(mobile_record_handler))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .with_state(state)
}
