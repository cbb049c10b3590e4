mod health;
mod identity;
mod mobile_record;
mod mobile_upload;
mod plugin_config;
mod transcribe;
mod upload;

pub use health::{HealthResponse, health_handler};
pub use identity::session_user;
pub use mobile_record::{RECORD_PAGE_CSP, mobile_record_handler};
pub use mobile_upload::{MobileUploadResponse, mobile_upload_handler};
pub use plugin_config::{PublicConfigResponse, plugin_config_handler};
pub use transcribe::{TranscribeFailure, TranscribeResponse, transcribe_handler};
pub use upload::{UploadResponse, upload_handler};
