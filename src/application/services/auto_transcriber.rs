use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::application::config::ConfigStore;
use crate::application::ports::{PostStore, TranscriptionEngine};
use crate::domain::PostId;

/// Background transcriptions allowed in flight at once.
pub const AUTO_TRANSCRIBE_SLOTS: usize = 2;

/// Pause between upload and the provider call.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);

/// Best-effort transcription right after an upload.
///
/// Admission is non-blocking: when every slot is taken the request is dropped,
/// never queued. Failures are logged and never reach the uploader.
pub struct AutoTranscriber {
    config: Arc<ConfigStore>,
    posts: Arc<dyn PostStore>,
    engine: Arc<dyn TranscriptionEngine>,
    slots: Arc<Semaphore>,
    settle_delay: Duration,
}

impl AutoTranscriber {
    pub fn new(
        config: Arc<ConfigStore>,
        posts: Arc<dyn PostStore>,
        engine: Arc<dyn TranscriptionEngine>,
    ) -> Self {
        Self {
            config,
            posts,
            engine,
            slots: Arc::new(Semaphore::new(AUTO_TRANSCRIBE_SLOTS)),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    pub fn with_settle_delay(mut self, settle_delay: Duration) -> Self {
        self.settle_delay = settle_delay;
        self
    }

    pub fn available_slots(&self) -> usize {
        self.slots.available_permits()
    }

    /// Starts a detached transcription for `post_id` if enabled and a slot is free.
    ///
    /// Returns the task handle when admitted, `None` when disabled or dropped.
    pub fn trigger(
        &self,
        post_id: PostId,
        audio: Vec<u8>,
        mime_type: String,
    ) -> Option<JoinHandle<()>> {
        if !self.config.snapshot().auto_transcribe_enabled() {
            return None;
        }

        let permit = match Arc::clone(&self.slots).try_acquire_owned() {
            Ok(permit) => permit,
            Err(_) => {
                tracing::warn!(post_id = %post_id, "Auto-transcribe skipped: too many in flight");
                return None;
            }
        };

        let job = AutoTranscribeJob {
            config: Arc::clone(&self.config),
            posts: Arc::clone(&self.posts),
            engine: Arc::clone(&self.engine),
            settle_delay: self.settle_delay,
        };
        let span = tracing::info_span!("auto_transcribe", post_id = %post_id);

        Some(tokio::spawn(
            async move {
                job.run(post_id, audio, mime_type).await;
                drop(permit);
            }
            .instrument(span),
        ))
    }
}

struct AutoTranscribeJob {
    config: Arc<ConfigStore>,
    posts: Arc<dyn PostStore>,
    engine: Arc<dyn TranscriptionEngine>,
    settle_delay: Duration,
}

impl AutoTranscribeJob {
    async fn run(self, post_id: PostId, audio: Vec<u8>, mime_type: String) {
        tokio::time::sleep(self.settle_delay).await;

        let config = self.config.snapshot();
        if !config.auto_transcribe_enabled() {
            tracing::debug!("Auto-transcribe disabled since upload");
            return;
        }

        let transcription_config = config.transcription_config();
        let result = self
            .engine
            .transcribe(&audio, &mime_type, &transcription_config)
            .await;
        drop(audio);

        let transcript = match result {
            Ok(t) => t,
            Err(e) => {
                let e = e.redact(&transcription_config.api_key);
                tracing::error!(error = %e, kind = %e.kind(), "Auto-transcription failed");
                return;
            }
        };

        // Re-read: the post may have changed while the provider was working.
        let mut post = match self.posts.get_post(&post_id).await {
            Ok(Some(post)) => post,
            Ok(None) => {
                tracing::warn!("Post vanished before auto-transcript could be stored");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to reload post after auto-transcription");
                return;
            }
        };

        if post.transcript().is_some() {
            tracing::debug!("Post already transcribed, keeping stored transcript");
            return;
        }

        post.set_transcript(&transcript);
        match self.posts.update_post(&post).await {
            Ok(_) => tracing::info!(chars = transcript.len(), "Auto-transcription stored"),
            Err(e) => tracing::error!(error = %e, "Failed to store auto-transcription"),
        }
    }
}
