mod audio_format;
mod ids;
mod mobile_token;
mod secret;
mod site_url;
mod transcription_provider;
mod voice_post;

pub use audio_format::{AudioFormat, UNKNOWN_AUDIO_EXTENSION, extension_for_content_type};
pub use ids::{ChannelId, FileId, PostId, UserId};
pub use mobile_token::MobileToken;
pub use secret::{MIN_MASKED_SECRET_LEN, SECRET_MASK, mask_secret};
pub use site_url::{PLUGIN_ID, SiteUrl};
pub use transcription_provider::{DEEPINFRA_ENDPOINT, OPENAI_ENDPOINT, TranscriptionProvider};
pub use voice_post::{
    PROP_VOICE_DURATION, PROP_VOICE_MIME_TYPE, PROP_VOICE_TRANSCRIPT, Post,
    VOICE_MESSAGE_POST_TYPE, normalize_duration,
};
