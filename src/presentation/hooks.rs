use std::sync::Arc;

use crate::application::config::{ConfigStore, PluginConfiguration};
use crate::application::ports::HostError;
use crate::application::services::{CommandArgs, CommandResponse, VoiceCommand};
use crate::domain::PLUGIN_ID;
use crate::presentation::state::AppState;

/// Lifecycle callbacks the host invokes outside of HTTP.
pub struct PluginHooks {
    config: Arc<ConfigStore>,
    voice_command: Arc<VoiceCommand>,
}

impl PluginHooks {
    pub fn new(state: &AppState) -> Self {
        Self {
            config: Arc::clone(&state.config),
            voice_command: Arc::clone(&state.voice_command),
        }
    }

    pub async fn on_activate(&self, configuration: PluginConfiguration) -> Result<(), HostError> {
        self.config.replace(configuration);
        self.voice_command.register().await?;
        tracing::info!(
            plugin_id = PLUGIN_ID,
            version = env!("CARGO_PKG_VERSION"),
            "Voice Message plugin activated"
        );
        Ok(())
    }

    pub async fn on_deactivate(&self) {
        self.voice_command.unregister().await;
        tracing::info!(plugin_id = PLUGIN_ID, "Voice Message plugin deactivated");
    }

    pub fn on_configuration_change(&self, configuration: PluginConfiguration) {
        self.config.replace(configuration);
        let current = self.config.snapshot();
        tracing::info!(
            transcription = current.transcription_enabled(),
            auto_transcribe = current.auto_transcribe_enabled(),
            provider = %current.provider(),
            "Configuration updated"
        );
    }

    pub async fn execute_command(&self, args: &CommandArgs) -> CommandResponse {
        self.voice_command.execute(args).await
    }
}
