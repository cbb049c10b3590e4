use std::fmt;

pub const DEEPINFRA_ENDPOINT: &str =
    "https://api.deepinfra.com/v1/inference/openai/whisper-large-v3-turbo";
pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/audio/transcriptions";

/// Speech-to-text API shapes the plugin can talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TranscriptionProvider {
    /// DeepInfra inference endpoint; the model is part of the URL.
    #[default]
    DeepInfra,
    OpenAi,
    /// Operator-supplied OpenAI-compatible endpoint.
    Custom,
}

impl TranscriptionProvider {
    /// Resolves the configured provider name. Empty or unknown names fall back to DeepInfra.
    pub fn from_setting(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "openai" => Self::OpenAi,
            "custom" => Self::Custom,
            _ => Self::DeepInfra,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeepInfra => "deepinfra",
            Self::OpenAi => "openai",
            Self::Custom => "custom",
        }
    }

    /// Fixed endpoint for built-in providers; `None` for custom.
    pub fn builtin_endpoint(&self) -> Option<&'static str> {
        match self {
            Self::DeepInfra => Some(DEEPINFRA_ENDPOINT),
            Self::OpenAi => Some(OPENAI_ENDPOINT),
            Self::Custom => None,
        }
    }

    /// Multipart field carrying the audio payload.
    pub fn audio_field(&self) -> &'static str {
        match self {
            Self::DeepInfra => "audio",
            Self::OpenAi | Self::Custom => "file",
        }
    }

    /// Whether `model` and `response_format` accompany the audio part.
    pub fn sends_model_fields(&self) -> bool {
        !matches!(self, Self::DeepInfra)
    }
}

impl fmt::Display for TranscriptionProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
