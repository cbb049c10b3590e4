use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::{FileStore, HostError, PostStore};
use crate::domain::{ChannelId, FileId, Post, PostId, UserId, extension_for_content_type};

use super::AutoTranscriber;

/// Audio received from a client, ready to become a voice message.
#[derive(Debug, Clone)]
pub struct VoiceUpload {
    pub user_id: UserId,
    pub channel_id: ChannelId,
    pub root_id: Option<PostId>,
    /// Seconds, already normalized.
    pub duration: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadedVoiceMessage {
    pub post: Post,
    pub file_id: FileId,
}

/// Stores the audio with the host and creates the voice-message post.
pub struct UploadService {
    files: Arc<dyn FileStore>,
    posts: Arc<dyn PostStore>,
    auto_transcriber: Arc<AutoTranscriber>,
}

impl UploadService {
    pub fn new(
        files: Arc<dyn FileStore>,
        posts: Arc<dyn PostStore>,
        auto_transcriber: Arc<AutoTranscriber>,
    ) -> Self {
        Self {
            files,
            posts,
            auto_transcriber,
        }
    }

    #[tracing::instrument(skip(self, upload), fields(
        user_id = %upload.user_id,
        channel_id = %upload.channel_id,
        bytes = upload.data.len(),
    ))]
    pub async fn upload(&self, upload: VoiceUpload) -> Result<UploadedVoiceMessage, UploadError> {
        if upload.data.is_empty() {
            return Err(UploadError::EmptyAudio);
        }

        let filename = voice_filename(Utc::now(), &upload.mime_type);
        let file_id = self
            .files
            .upload_file(&upload.data, &upload.channel_id, &filename)
            .await
            .map_err(UploadError::FileStorage)?;

        let post = Post::new_voice_message(
            upload.user_id,
            upload.channel_id,
            upload.root_id,
            file_id.clone(),
            &upload.duration,
            &upload.mime_type,
        );
        let created = self
            .posts
            .create_post(post)
            .await
            .map_err(UploadError::PostCreation)?;

        tracing::info!(post_id = %created.id, file_id = %file_id, filename = %filename, "Voice message created");

        self.auto_transcriber
            .trigger(created.id.clone(), upload.data, upload.mime_type);

        Ok(UploadedVoiceMessage {
            post: created,
            file_id,
        })
    }
}

/// `voice_20240131_093015.webm`-style name for a stored recording.
pub fn voice_filename(at: DateTime<Utc>, mime_type: &str) -> String {
    format!(
        "voice_{}{}",
        at.format("%Y%m%d_%H%M%S"),
        extension_for_content_type(mime_type)
    )
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("audio data is empty")]
    EmptyAudio,
    #[error("file upload failed: {0}")]
    FileStorage(HostError),
    #[error("post creation failed: {0}")]
    PostCreation(HostError),
}
