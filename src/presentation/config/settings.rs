use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::config::PluginConfiguration;

use super::Environment;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub host: HostSettings,
    #[serde(default)]
    pub plugin: PluginConfiguration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    #[serde(default)]
    pub json: bool,
}

/// What the standalone server knows about the chat server it stands in for.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostSettings {
    pub site_url: Option<String>,
    /// `channel_id:user_id` pairs granted membership at startup.
    #[serde(default)]
    pub seed_members: Vec<String>,
}

impl Settings {
    /// Defaults, then `appsettings.<env>` if present, then `APP_` variables
    /// with `__` between sections (`APP_SERVER__PORT=8080`).
    pub fn load(environment: Environment) -> Result<Self, SettingsError> {
        let configuration = Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(" ")
                    .with_list_parse_key("host.seed_members")
                    .try_parsing(true),
            )
            .build()?;

        Ok(configuration.try_deserialize()?)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),
}
