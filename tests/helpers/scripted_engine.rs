use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use voice_message::application::config::TranscriptionConfig;
use voice_message::application::ports::{TranscriptionEngine, TranscriptionError};

/// Engine double returning a fixed result and counting calls.
pub struct ScriptedEngine {
    result: Result<String, TranscriptionError>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl ScriptedEngine {
    pub fn returning(transcript: &str) -> Self {
        Self {
            result: Ok(transcript.to_string()),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(error: TranscriptionError) -> Self {
        Self {
            result: Err(error),
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for ScriptedEngine {
    async fn transcribe(
        &self,
        _audio_data: &[u8],
        _mime_type: &str,
        _config: &TranscriptionConfig,
    ) -> Result<String, TranscriptionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.result.clone()
    }
}
