mod command_registry;
mod directory;
mod ephemeral_messenger;
mod file_store;
mod host_error;
mod kv_store;
mod post_store;
mod transcription_engine;

pub use command_registry::{CommandDefinition, CommandRegistry};
pub use directory::Directory;
pub use ephemeral_messenger::EphemeralMessenger;
pub use file_store::FileStore;
pub use host_error::HostError;
pub use kv_store::KvStore;
pub use post_store::PostStore;
pub use transcription_engine::{FailureKind, TranscriptionEngine, TranscriptionError};
