mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{HostSettings, LoggingSettings, ServerSettings, Settings, SettingsError};
