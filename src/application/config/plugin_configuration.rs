use std::fmt;

use serde::Deserialize;

use crate::domain::TranscriptionProvider;

pub const DEFAULT_MAX_RECORDING_DURATION_SECONDS: u64 = 600;
pub const DEFAULT_MAX_FILE_SIZE_MB: u64 = 50;
pub const DEFAULT_MOBILE_TOKEN_TTL_SECONDS: u64 = 15 * 60;
pub const DEFAULT_TRANSCRIPTION_MAX_DURATION_SECONDS: u64 = 300;
pub const DEFAULT_TRANSCRIPTION_MODEL: &str = "openai/whisper-large-v3-turbo";
pub const ALLOW_ALL_ROLES: &str = "all";

/// Plugin settings as the host delivers them: free-form strings and flags.
///
/// Accepts both snake_case keys (settings files, environment) and the host's
/// PascalCase keys. Every accessor resolves a typed value and never fails;
/// malformed or negative numbers fall back to their defaults.
#[derive(Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PluginConfiguration {
    #[serde(alias = "MaxRecordingDurationSeconds")]
    pub max_recording_duration_seconds: String,
    #[serde(alias = "MaxFileSizeMB")]
    pub max_file_size_mb: String,
    #[serde(alias = "MobileTokenTTLSeconds")]
    pub mobile_token_ttl_seconds: String,
    #[serde(alias = "AllowedRoles")]
    pub allowed_roles: String,
    #[serde(alias = "EnableTranscription")]
    pub enable_transcription: bool,
    #[serde(alias = "TranscriptionProvider")]
    pub transcription_provider: String,
    #[serde(alias = "TranscriptionAPIKey")]
    pub transcription_api_key: String,
    #[serde(alias = "TranscriptionServiceURL")]
    pub transcription_service_url: String,
    #[serde(alias = "TranscriptionModel")]
    pub transcription_model: String,
    #[serde(alias = "TranscriptionLanguage")]
    pub transcription_language: String,
    #[serde(alias = "TranscriptionMaxDurationSeconds")]
    pub transcription_max_duration_seconds: String,
    #[serde(alias = "AutoTranscribe")]
    pub auto_transcribe: bool,
}

fn seconds_or(raw: &str, default: u64) -> u64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return default;
    }
    raw.parse::<u64>().unwrap_or(default)
}

impl PluginConfiguration {
    pub fn max_recording_duration_seconds(&self) -> u64 {
        seconds_or(
            &self.max_recording_duration_seconds,
            DEFAULT_MAX_RECORDING_DURATION_SECONDS,
        )
    }

    pub fn max_file_size_bytes(&self) -> u64 {
        let mb = match seconds_or(&self.max_file_size_mb, DEFAULT_MAX_FILE_SIZE_MB) {
            0 => DEFAULT_MAX_FILE_SIZE_MB,
            mb => mb,
        };
        mb.saturating_mul(1 << 20)
    }

    pub fn mobile_token_ttl_seconds(&self) -> u64 {
        seconds_or(
            &self.mobile_token_ttl_seconds,
            DEFAULT_MOBILE_TOKEN_TTL_SECONDS,
        )
    }

    /// Longest recording accepted for transcription; 0 disables the limit.
    pub fn transcription_max_duration_seconds(&self) -> u64 {
        seconds_or(
            &self.transcription_max_duration_seconds,
            DEFAULT_TRANSCRIPTION_MAX_DURATION_SECONDS,
        )
    }

    pub fn allowed_roles(&self) -> &str {
        match self.allowed_roles.trim() {
            "" => ALLOW_ALL_ROLES,
            roles => roles,
        }
    }

    pub fn transcription_enabled(&self) -> bool {
        self.enable_transcription
    }

    pub fn provider(&self) -> TranscriptionProvider {
        TranscriptionProvider::from_setting(&self.transcription_provider)
    }

    /// Endpoint for the resolved provider. Empty when a custom provider has no URL.
    pub fn transcription_endpoint(&self) -> String {
        match self.provider().builtin_endpoint() {
            Some(endpoint) => endpoint.to_string(),
            None => self.transcription_service_url.trim().to_string(),
        }
    }

    pub fn transcription_model(&self) -> &str {
        match self.transcription_model.trim() {
            "" => DEFAULT_TRANSCRIPTION_MODEL,
            model => model,
        }
    }

    pub fn api_key(&self) -> &str {
        self.transcription_api_key.trim()
    }

    pub fn language(&self) -> &str {
        self.transcription_language.trim()
    }

    /// Background transcription after upload needs both flags and a credential.
    pub fn auto_transcribe_enabled(&self) -> bool {
        self.enable_transcription && self.auto_transcribe && !self.api_key().is_empty()
    }

    pub fn transcription_config(&self) -> TranscriptionConfig {
        TranscriptionConfig {
            provider: self.provider(),
            endpoint: self.transcription_endpoint(),
            api_key: self.api_key().to_string(),
            model: self.transcription_model().to_string(),
            language: self.language().to_string(),
        }
    }
}

impl fmt::Debug for PluginConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginConfiguration")
            .field("max_recording_duration_seconds", &self.max_recording_duration_seconds)
            .field("max_file_size_mb", &self.max_file_size_mb)
            .field("mobile_token_ttl_seconds", &self.mobile_token_ttl_seconds)
            .field("allowed_roles", &self.allowed_roles)
            .field("enable_transcription", &self.enable_transcription)
            .field("transcription_provider", &self.transcription_provider)
            .field("transcription_api_key", &"[REDACTED]")
            .field("transcription_service_url", &self.transcription_service_url)
            .field("transcription_model", &self.transcription_model)
            .field("transcription_language", &self.transcription_language)
            .field(
                "transcription_max_duration_seconds",
                &self.transcription_max_duration_seconds,
            )
            .field("auto_transcribe", &self.auto_transcribe)
            .finish()
    }
}

/// Resolved provider settings for one transcription call.
#[derive(Clone, PartialEq)]
pub struct TranscriptionConfig {
    pub provider: TranscriptionProvider,
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub language: String,
}

impl fmt::Debug for TranscriptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranscriptionConfig")
            .field("provider", &self.provider)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("language", &self.language)
            .finish()
    }
}
