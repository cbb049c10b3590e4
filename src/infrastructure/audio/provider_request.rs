use reqwest::multipart;

use crate::application::config::TranscriptionConfig;
use crate::application::ports::TranscriptionError;
use crate::domain::AudioFormat;

const FALLBACK_FORMAT: AudioFormat = AudioFormat::Webm;

/// Shape of one multipart transcription request, checked before any I/O.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    pub audio_field: &'static str,
    pub filename: String,
    pub part_mime: &'static str,
    pub text_fields: Vec<(&'static str, String)>,
}

impl ProviderRequest {
    pub fn prepare(
        audio_data: &[u8],
        mime_type: &str,
        config: &TranscriptionConfig,
    ) -> Result<Self, TranscriptionError> {
        if config.endpoint.trim().is_empty() {
            return Err(TranscriptionError::Config(
                "transcription URL not configured".to_string(),
            ));
        }
        if config.api_key.trim().is_empty() {
            return Err(TranscriptionError::Config(
                "transcription API key not configured".to_string(),
            ));
        }
        if audio_data.is_empty() {
            return Err(TranscriptionError::Input("audio data is empty".to_string()));
        }

        let format = AudioFormat::from_content_type(mime_type).unwrap_or(FALLBACK_FORMAT);
        let filename = format!("voice{}", format.extension());
        let part_mime = AudioFormat::from_filename(&filename)
            .unwrap_or(FALLBACK_FORMAT)
            .as_mime();

        let mut text_fields = Vec::new();
        if config.provider.sends_model_fields() {
            text_fields.push(("model", config.model.clone()));
            text_fields.push(("response_format", "json".to_string()));
        }
        let language = config.language.trim();
        if !language.is_empty() {
            text_fields.push(("language", language.to_string()));
        }

        Ok(Self {
            audio_field: config.provider.audio_field(),
            filename,
            part_mime,
            text_fields,
        })
    }

    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.text_fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value.as_str())
    }

    /// Builds a fresh form; a form is consumed by each send.
    pub fn to_form(&self, audio_data: &[u8]) -> Result<multipart::Form, TranscriptionError> {
        let audio_part = multipart::Part::bytes(audio_data.to_vec())
            .file_name(self.filename.clone())
            .mime_str(self.part_mime)
            .map_err(|e| TranscriptionError::Input(format!("mime: {}", e)))?;

        let form = self
            .text_fields
            .iter()
            .fold(
                multipart::Form::new().part(self.audio_field, audio_part),
                |form, (name, value)| form.text(*name, value.clone()),
            );
        Ok(form)
    }
}
