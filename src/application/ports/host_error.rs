/// Failure reported by a host API call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HostError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("storage failed: {0}")]
    StorageFailed(String),
    #[error("host unavailable: {0}")]
    Unavailable(String),
}
