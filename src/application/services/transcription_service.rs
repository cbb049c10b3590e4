use std::sync::Arc;

use crate::application::config::ConfigStore;
use crate::application::ports::{
    Directory, FileStore, HostError, PostStore, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{ChannelId, PostId, UserId};

/// On-demand transcription of an existing voice message.
///
/// A stored transcript is authoritative: once present it is returned as-is and
/// the provider is not called again. Two concurrent requests for the same post
/// may both reach the provider; whichever finishes last is persisted.
pub struct TranscriptionService {
    config: Arc<ConfigStore>,
    posts: Arc<dyn PostStore>,
    files: Arc<dyn FileStore>,
    directory: Arc<dyn Directory>,
    engine: Arc<dyn TranscriptionEngine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptOutcome {
    pub transcript: String,
    pub cached: bool,
}

impl TranscriptionService {
    pub fn new(
        config: Arc<ConfigStore>,
        posts: Arc<dyn PostStore>,
        files: Arc<dyn FileStore>,
        directory: Arc<dyn Directory>,
        engine: Arc<dyn TranscriptionEngine>,
    ) -> Self {
        Self {
            config,
            posts,
            files,
            directory,
            engine,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.snapshot().transcription_enabled()
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id, post_id = %post_id))]
    pub async fn transcribe_post(
        &self,
        user_id: &UserId,
        post_id: &PostId,
    ) -> Result<TranscriptOutcome, TranscribePostError> {
        let config = self.config.snapshot();
        if !config.transcription_enabled() {
            return Err(TranscribePostError::Disabled);
        }

        let mut post = match self.posts.get_post(post_id).await {
            Ok(Some(post)) => post,
            Ok(None) => return Err(TranscribePostError::PostNotFound(post_id.clone())),
            Err(e) => {
                tracing::warn!(error = %e, "Post lookup failed");
                return Err(TranscribePostError::PostNotFound(post_id.clone()));
            }
        };

        let file_id = match post.audio_file_id() {
            Some(id) if post.is_voice_message() => id.clone(),
            _ => return Err(TranscribePostError::NotVoiceMessage(post_id.clone())),
        };

        let is_member = self
            .directory
            .is_channel_member(&post.channel_id, user_id)
            .await
            .unwrap_or(false);
        if !is_member {
            return Err(TranscribePostError::Forbidden(post.channel_id.clone()));
        }

        if let Some(transcript) = post.transcript() {
            tracing::debug!("Returning stored transcript");
            return Ok(TranscriptOutcome {
                transcript: transcript.to_string(),
                cached: true,
            });
        }

        let duration = post.duration_seconds();
        let limit = config.transcription_max_duration_seconds();
        if limit > 0 && duration > limit as f64 {
            return Err(TranscribePostError::TooLong { duration, limit });
        }

        let audio = self.files.get_file(&file_id).await.map_err(|e| {
            tracing::error!(error = %e, file_id = %file_id, "Failed to fetch audio file");
            TranscribePostError::AudioUnavailable(e)
        })?;

        let transcription_config = config.transcription_config();
        let mime_type = post.mime_type().to_string();
        let transcript = self
            .engine
            .transcribe(&audio, &mime_type, &transcription_config)
            .await
            .map_err(|e| {
                let e = e.redact(&transcription_config.api_key);
                tracing::error!(error = %e, kind = %e.kind(), "Transcription failed");
                TranscribePostError::Transcription(e)
            })?;

        post.set_transcript(&transcript);
        if let Err(e) = self.posts.update_post(&post).await {
            tracing::error!(error = %e, "Failed to store transcript on post");
        }

        tracing::info!(chars = transcript.len(), "Voice message transcribed");

        Ok(TranscriptOutcome {
            transcript,
            cached: false,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribePostError {
    #[error("Transcription is disabled")]
    Disabled,
    #[error("post not found: {0}")]
    PostNotFound(PostId),
    #[error("post {0} is not a voice message")]
    NotVoiceMessage(PostId),
    #[error("not a member of channel {0}")]
    Forbidden(ChannelId),
    #[error("Voice message too long for transcription ({duration:.0}s > {limit}s limit)")]
    TooLong { duration: f64, limit: u64 },
    #[error("failed to read audio file: {0}")]
    AudioUnavailable(HostError),
    #[error("transcription: {0}")]
    Transcription(TranscriptionError),
}
