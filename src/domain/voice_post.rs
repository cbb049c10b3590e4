use std::collections::HashMap;

use super::{ChannelId, FileId, PostId, UserId};

/// Post type marker the webapp renders with the voice player.
pub const VOICE_MESSAGE_POST_TYPE: &str = "custom_voice_message";

pub const PROP_VOICE_DURATION: &str = "voice_duration";
pub const PROP_VOICE_MIME_TYPE: &str = "voice_mime_type";
pub const PROP_VOICE_TRANSCRIPT: &str = "voice_transcript";

/// A chat post as seen through the host's post API.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub channel_id: ChannelId,
    pub root_id: Option<PostId>,
    pub message: String,
    pub post_type: String,
    pub file_ids: Vec<FileId>,
    pub props: HashMap<String, String>,
}

impl Post {
    pub fn new_voice_message(
        user_id: UserId,
        channel_id: ChannelId,
        root_id: Option<PostId>,
        file_id: FileId,
        duration: &str,
        mime_type: &str,
    ) -> Self {
        let mut props = HashMap::new();
        props.insert(PROP_VOICE_DURATION.to_string(), duration.to_string());
        props.insert(PROP_VOICE_MIME_TYPE.to_string(), mime_type.to_string());

        Self {
            id: PostId::generate(),
            user_id,
            channel_id,
            root_id,
            message: String::new(),
            post_type: VOICE_MESSAGE_POST_TYPE.to_string(),
            file_ids: vec![file_id],
            props,
        }
    }

    pub fn is_voice_message(&self) -> bool {
        self.post_type == VOICE_MESSAGE_POST_TYPE && !self.file_ids.is_empty()
    }

    pub fn audio_file_id(&self) -> Option<&FileId> {
        self.file_ids.first()
    }

    /// Stored transcript, if one has been written.
    pub fn transcript(&self) -> Option<&str> {
        self.props
            .get(PROP_VOICE_TRANSCRIPT)
            .map(String::as_str)
            .filter(|t| !t.trim().is_empty())
    }

    pub fn set_transcript(&mut self, transcript: &str) {
        self.props
            .insert(PROP_VOICE_TRANSCRIPT.to_string(), transcript.to_string());
    }

    /// Recorded duration in seconds; 0 when missing or unparseable.
    pub fn duration_seconds(&self) -> f64 {
        self.props
            .get(PROP_VOICE_DURATION)
            .and_then(|d| d.trim().parse::<f64>().ok())
            .filter(|d| d.is_finite())
            .unwrap_or(0.0)
    }

    pub fn mime_type(&self) -> &str {
        self.props
            .get(PROP_VOICE_MIME_TYPE)
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Normalizes a client-reported duration to the string stored on the post.
pub fn normalize_duration(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(d) if d.parse::<f64>().is_ok_and(f64::is_finite) => d.to_string(),
        _ => "0".to_string(),
    }
}
