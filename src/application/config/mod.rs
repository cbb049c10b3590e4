mod config_store;
mod plugin_configuration;

pub use config_store::ConfigStore;
pub use plugin_configuration::{
    ALLOW_ALL_ROLES, DEFAULT_MAX_FILE_SIZE_MB, DEFAULT_MAX_RECORDING_DURATION_SECONDS,
    DEFAULT_MOBILE_TOKEN_TTL_SECONDS, DEFAULT_TRANSCRIPTION_MAX_DURATION_SECONDS,
    DEFAULT_TRANSCRIPTION_MODEL, PluginConfiguration, TranscriptionConfig,
};
