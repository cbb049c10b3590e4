use std::fmt;

use async_trait::async_trait;

use crate::application::config::TranscriptionConfig;
use crate::domain::mask_secret;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        mime_type: &str,
        config: &TranscriptionConfig,
    ) -> Result<String, TranscriptionError>;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranscriptionError {
    /// Endpoint or credential missing.
    #[error("config: {0}")]
    Config(String),
    #[error("input: {0}")]
    Input(String),
    #[error("network: {message}")]
    Network { message: String, retryable: bool },
    #[error("api_error: status {status}, body: {body}")]
    Api { status: u16, body: String },
    #[error("parse_error: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Config,
    Input,
    Network,
    Api,
    Parse,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Config => "config",
            FailureKind::Input => "input",
            FailureKind::Network => "network",
            FailureKind::Api => "api_error",
            FailureKind::Parse => "parse_error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TranscriptionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Config(_) => FailureKind::Config,
            Self::Input(_) => FailureKind::Input,
            Self::Network { .. } => FailureKind::Network,
            Self::Api { .. } => FailureKind::Api,
            Self::Parse(_) => FailureKind::Parse,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { retryable, .. } => *retryable,
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            Self::Config(_) | Self::Input(_) | Self::Parse(_) => false,
        }
    }

    /// Short message safe to show to the user who asked for the transcript.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Config(_) => "Transcription not configured properly.",
            Self::Input(_) => "Audio file is empty or unreadable.",
            Self::Network { .. } => "Could not reach transcription service.",
            Self::Api { status: 401 | 403, .. } => "Transcription API auth failed.",
            Self::Api { status: 429, .. } => "Rate limit exceeded. Try again later.",
            Self::Api { status: 500..=599, .. } => "Transcription service error.",
            Self::Api { .. } => "Transcription failed.",
            Self::Parse(_) => "Unexpected response from transcription service.",
        }
    }

    /// Rewrites every free-text detail, keeping kind and status.
    pub fn map_detail(self, f: impl Fn(&str) -> String) -> Self {
        match self {
            Self::Config(m) => Self::Config(f(&m)),
            Self::Input(m) => Self::Input(f(&m)),
            Self::Network { message, retryable } => Self::Network {
                message: f(&message),
                retryable,
            },
            Self::Api { status, body } => Self::Api {
                status,
                body: f(&body),
            },
            Self::Parse(m) => Self::Parse(f(&m)),
        }
    }

    /// Masks `secret` wherever it leaked into the error text.
    pub fn redact(self, secret: &str) -> Self {
        self.map_detail(|detail| mask_secret(detail, secret))
    }
}
