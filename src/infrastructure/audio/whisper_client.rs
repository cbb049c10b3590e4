use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;

use crate::application::config::TranscriptionConfig;
use crate::application::ports::{TranscriptionEngine, TranscriptionError};
use crate::domain::mask_secret;
use crate::infrastructure::observability::preview;

use super::provider_request::ProviderRequest;
use super::transcript_parser::parse_transcript;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const RESPONSE_LOG_PREVIEW_CHARS: usize = 500;
const API_ERROR_PREVIEW_CHARS: usize = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Multiplied by the number of attempts already made.
    pub delay_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            delay_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.delay_unit * attempt.saturating_sub(1)
    }
}

/// Whisper-compatible HTTP client for DeepInfra, OpenAI and custom endpoints.
pub struct WhisperClient {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl WhisperClient {
    pub fn new() -> Result<Self, TranscriptionError> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TranscriptionError::Config(format!("http client: {}", e)))?;
        Ok(Self {
            client,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    async fn attempt(
        &self,
        request: &ProviderRequest,
        audio_data: &[u8],
        config: &TranscriptionConfig,
    ) -> Result<String, TranscriptionError> {
        let form = request.to_form(audio_data)?;

        let response = self
            .client
            .post(config.endpoint.trim())
            .bearer_auth(config.api_key.trim())
            .multipart(form)
            .send()
            .await
            .map_err(send_failure)?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TranscriptionError::Network {
            message: format!("read response body: {}", error_chain(&e)),
            retryable: true,
        })?;

        tracing::debug!(
            status = status.as_u16(),
            body_len = body.len(),
            body_preview = %mask_secret(&preview(&body, RESPONSE_LOG_PREVIEW_CHARS), &config.api_key),
            "Transcription response received"
        );

        if !status.is_success() {
            return Err(TranscriptionError::Api {
                status: status.as_u16(),
                body: preview(&body, API_ERROR_PREVIEW_CHARS),
            });
        }

        parse_transcript(&body)
    }
}

#[async_trait]
impl TranscriptionEngine for WhisperClient {
    async fn transcribe(
        &self,
        audio_data: &[u8],
        mime_type: &str,
        config: &TranscriptionConfig,
    ) -> Result<String, TranscriptionError> {
        let request = ProviderRequest::prepare(audio_data, mime_type, config)
            .map_err(|e| e.redact(&config.api_key))?;

        tracing::debug!(
            provider = %config.provider,
            url = %mask_secret(&config.endpoint, &config.api_key),
            field = request.audio_field,
            filename = %request.filename,
            bytes = audio_data.len(),
            mime = request.part_mime,
            "Sending audio for transcription"
        );

        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;
        loop {
            if attempt > 1 {
                let delay = self.retry.delay_before(attempt);
                tracing::info!(attempt, delay_ms = delay.as_millis() as u64, "Retrying transcription");
                tokio::time::sleep(delay).await;
            }

            match self.attempt(&request, audio_data, config).await {
                Ok(transcript) => {
                    tracing::info!(attempt, chars = transcript.len(), "Transcription completed");
                    return Ok(transcript);
                }
                Err(e) => {
                    let e = e.redact(&config.api_key);
                    let retryable = e.is_retryable();
                    tracing::warn!(attempt, kind = %e.kind(), retryable, error = %e, "Transcription attempt failed");
                    if !retryable || attempt >= max_attempts {
                        return Err(e);
                    }
                }
            }
            attempt += 1;
        }
    }
}

fn send_failure(error: reqwest::Error) -> TranscriptionError {
    TranscriptionError::Network {
        retryable: !connection_closed(&error),
        message: format!("request failed: {}", error_chain(&error)),
    }
}

/// A peer that hung up mid-exchange is not worth a second try.
fn connection_closed(error: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(err) = current {
        if let Some(io) = err.downcast_ref::<std::io::Error>() {
            if matches!(
                io.kind(),
                std::io::ErrorKind::UnexpectedEof
                    | std::io::ErrorKind::ConnectionReset
                    | std::io::ErrorKind::ConnectionAborted
                    | std::io::ErrorKind::BrokenPipe
            ) {
                return true;
            }
        }
        let text = err.to_string().to_lowercase();
        if text.contains("connection closed")
            || text.contains("connection reset")
            || text.contains("eof")
        {
            return true;
        }
        current = err.source();
    }
    false
}

fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(err) = source {
        message.push_str(": ");
        message.push_str(&err.to_string());
        source = err.source();
    }
    message
}
