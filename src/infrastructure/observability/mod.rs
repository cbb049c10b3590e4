mod body_preview;
mod init_tracing;
mod request_id;
mod tracing_config;

pub use body_preview::preview;
pub use init_tracing::init_tracing;
pub use request_id::{REQUEST_ID_HEADER, RequestId, SESSION_USER_HEADER, request_id_middleware};
pub use tracing_config::{DEFAULT_LOG_FILTER, TracingConfig};
