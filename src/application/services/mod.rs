mod access_policy;
mod auto_transcriber;
mod mobile_token_service;
mod mobile_upload_service;
mod transcription_service;
mod upload_service;
mod voice_command;

pub use access_policy::AccessPolicy;
pub use auto_transcriber::{AUTO_TRANSCRIBE_SLOTS, AutoTranscriber, DEFAULT_SETTLE_DELAY};
pub use mobile_token_service::{MOBILE_TOKEN_KEY_PREFIX, MobileTokenError, MobileTokenService};
pub use mobile_upload_service::{
    EPHEMERAL_CONFIRMATION_TTL, MobileUploadError, MobileUploadReceipt, MobileUploadService,
};
pub use transcription_service::{TranscribePostError, TranscriptOutcome, TranscriptionService};
pub use upload_service::{UploadError, UploadService, UploadedVoiceMessage, VoiceUpload, voice_filename};
pub use voice_command::{CommandArgs, CommandResponse, ResponseType, VOICE_TRIGGERS, VoiceCommand};
