use std::sync::Arc;

use serde::Serialize;

use crate::application::config::ConfigStore;
use crate::application::ports::{CommandDefinition, CommandRegistry, EphemeralMessenger, HostError};
use crate::domain::{ChannelId, PostId, SiteUrl, UserId};

use super::{AccessPolicy, MobileTokenService};

pub const VOICE_TRIGGERS: [&str; 2] = ["voice", "audiomsg"];

/// Slash command invocation as forwarded by the host.
#[derive(Debug, Clone)]
pub struct CommandArgs {
    pub command: String,
    pub user_id: UserId,
    pub channel_id: ChannelId,
    pub root_id: Option<PostId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Ephemeral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct CommandResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_type: Option<ResponseType>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goto_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
}

impl CommandResponse {
    fn ephemeral(channel_id: &ChannelId, text: impl Into<String>) -> Self {
        Self {
            response_type: Some(ResponseType::Ephemeral),
            text: text.into(),
            goto_location: None,
            channel_id: Some(channel_id.clone()),
        }
    }
}

/// `/voice` and `/audiomsg`: hand the user a one-time link to the recording page.
pub struct VoiceCommand {
    config: Arc<ConfigStore>,
    access: Arc<AccessPolicy>,
    tokens: Arc<MobileTokenService>,
    messenger: Arc<dyn EphemeralMessenger>,
    registry: Arc<dyn CommandRegistry>,
    site_url: SiteUrl,
}

impl VoiceCommand {
    pub fn new(
        config: Arc<ConfigStore>,
        access: Arc<AccessPolicy>,
        tokens: Arc<MobileTokenService>,
        messenger: Arc<dyn EphemeralMessenger>,
        registry: Arc<dyn CommandRegistry>,
        site_url: SiteUrl,
    ) -> Self {
        Self {
            config,
            access,
            tokens,
            messenger,
            registry,
            site_url,
        }
    }

    /// Registers both triggers, replacing any stale registration.
    pub async fn register(&self) -> Result<(), HostError> {
        for trigger in VOICE_TRIGGERS {
            if let Err(e) = self.registry.unregister_command(trigger).await {
                tracing::debug!(trigger, error = %e, "No stale registration to remove");
            }
            self.registry
                .register_command(CommandDefinition {
                    trigger: trigger.to_string(),
                    display_name: "Voice Message".to_string(),
                    auto_complete: true,
                    auto_complete_desc: "Record a voice message".to_string(),
                    auto_complete_hint: String::new(),
                })
                .await?;
        }
        Ok(())
    }

    pub async fn unregister(&self) {
        for trigger in VOICE_TRIGGERS {
            if let Err(e) = self.registry.unregister_command(trigger).await {
                tracing::debug!(trigger, error = %e, "Unregister failed");
            }
        }
    }

    #[tracing::instrument(skip(self, args), fields(user_id = %args.user_id, channel_id = %args.channel_id))]
    pub async fn execute(&self, args: &CommandArgs) -> CommandResponse {
        let Some(first) = args.command.split_whitespace().next() else {
            return CommandResponse::default();
        };
        let trigger = first.trim_start_matches('/');
        if !VOICE_TRIGGERS.contains(&trigger) {
            return CommandResponse::default();
        }

        if !self.access.is_user_allowed(&args.user_id).await {
            return CommandResponse::ephemeral(
                &args.channel_id,
                "⛔ You don't have permission to send voice messages.",
            );
        }

        let root_id = args.root_id.as_ref().filter(|r| !r.is_empty());
        let token = match self
            .tokens
            .issue(&args.user_id, &args.channel_id, root_id)
            .await
        {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e, "Failed to issue mobile token");
                return CommandResponse::ephemeral(
                    &args.channel_id,
                    "Failed to prepare recording. Check server logs.",
                );
            }
        };

        let record_url = self
            .site_url
            .mobile_record_url(&token, &args.channel_id, root_id);
        let config = self.config.snapshot();
        let text = format!(
            "🎤 **Voice Message**\n\nOpen the recording page:\n{}\n\n*Recording limit: {} min. Link valid for ~{} min (one-time use).*",
            record_url,
            config.max_recording_duration_seconds() / 60,
            config.mobile_token_ttl_seconds() / 60,
        );

        match self
            .messenger
            .send_ephemeral(&args.user_id, &args.channel_id, &text)
            .await
        {
            Ok(post_id) => {
                if let Err(e) = self.tokens.attach_ephemeral_post(&token, &post_id).await {
                    tracing::warn!(error = %e, "Failed to attach ephemeral post to token");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Failed to send recording link"),
        }

        CommandResponse {
            response_type: Some(ResponseType::Ephemeral),
            text: String::new(),
            goto_location: Some(record_url),
            channel_id: Some(args.channel_id.clone()),
        }
    }
}
