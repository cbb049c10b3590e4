mod provider_request;
mod transcript_parser;
mod whisper_client;

pub use provider_request::ProviderRequest;
pub use transcript_parser::parse_transcript;
pub use whisper_client::{REQUEST_TIMEOUT, RetryPolicy, WhisperClient};
