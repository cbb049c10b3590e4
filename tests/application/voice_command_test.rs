use std::sync::{Arc, Mutex};

use voice_message::application::config::PluginConfiguration;
use voice_message::application::ports::{CommandDefinition, CommandRegistry, HostError};
use voice_message::application::services::{
    CommandArgs, CommandResponse, MOBILE_TOKEN_KEY_PREFIX, ResponseType,
};
use voice_message::domain::{ChannelId, PLUGIN_ID, PostId, UserId};
use voice_message::infrastructure::host::InMemoryHost;
use voice_message::presentation::{AppState, HostPorts, PluginHooks};

use crate::helpers::fixtures::{
    ALICE, SITE_URL, TOWN_SQUARE, app_state, config_store, seeded_host, site_url,
};
use crate::helpers::scripted_engine::ScriptedEngine;

fn state(host: &Arc<InMemoryHost>, configuration: PluginConfiguration) -> AppState {
    app_state(host, Arc::new(ScriptedEngine::returning("unused")), configuration)
}

fn args(command: &str, root_id: Option<&str>) -> CommandArgs {
    CommandArgs {
        command: command.to_string(),
        user_id: UserId::new(ALICE),
        channel_id: ChannelId::new(TOWN_SQUARE),
        root_id: root_id.map(PostId::new),
    }
}

#[tokio::test]
async fn given_activation_when_registering_then_both_triggers_exist() {
    let host = seeded_host();
    let state = state(&host, PluginConfiguration::default());
    let hooks = PluginHooks::new(&state);

    hooks.on_activate(PluginConfiguration::default()).await.unwrap();

    assert_eq!(host.registered_triggers(), vec!["audiomsg", "voice"]);
}

#[tokio::test]
async fn given_deactivation_when_unregistering_then_triggers_removed() {
    let host = seeded_host();
    let state = state(&host, PluginConfiguration::default());
    let hooks = PluginHooks::new(&state);
    hooks.on_activate(PluginConfiguration::default()).await.unwrap();

    hooks.on_deactivate().await;

    assert!(host.registered_triggers().is_empty());
}

#[tokio::test]
async fn given_voice_command_when_executed_then_returns_record_link_and_prompt() {
    let host = seeded_host();
    let state = state(&host, PluginConfiguration::default());

    let response = state.voice_command.execute(&args("/voice", Some("root1"))).await;

    let link = response.goto_location.clone().unwrap();
    assert_eq!(response.response_type, Some(ResponseType::Ephemeral));
    assert!(response.text.is_empty());
    assert!(link.starts_with(&format!("{}/plugins/{}/mobile/record?token=", SITE_URL, PLUGIN_ID)));
    assert!(link.contains("&channel_id=town-square"));
    assert!(link.ends_with("&root_id=root1"));

    let keys = host.kv_keys();
    assert_eq!(keys.len(), 1);
    assert!(keys[0].starts_with(MOBILE_TOKEN_KEY_PREFIX));

    let grant: serde_json::Value = serde_json::from_slice(&host.kv_value(&keys[0]).unwrap()).unwrap();
    let prompt_id = PostId::new(grant["ephemeral_post_id"].as_str().unwrap());
    let prompt = host.ephemeral_post(&prompt_id).unwrap();
    assert!(prompt.message.contains(&link));
    assert!(prompt.message.contains("Recording limit: 10 min"));
    assert!(prompt.message.contains("~15 min (one-time use)"));
}

#[tokio::test]
async fn given_audiomsg_with_arguments_when_executed_then_handled() {
    let host = seeded_host();
    let state = state(&host, PluginConfiguration::default());

    let response = state.voice_command.execute(&args("/audiomsg now please", None)).await;

    let link = response.goto_location.unwrap();
    assert!(!link.contains("root_id"));
}

#[tokio::test]
async fn given_denied_user_when_executed_then_ephemeral_refusal() {
    let host = seeded_host();
    let settings = PluginConfiguration {
        allowed_roles: "admin".to_string(),
        ..Default::default()
    };
    let state = state(&host, settings);
    let hooks = PluginHooks::new(&state);

    let response = hooks.execute_command(&args("/voice", None)).await;

    assert_eq!(response.response_type, Some(ResponseType::Ephemeral));
    assert!(response.text.starts_with("⛔"));
    assert_eq!(response.goto_location, None);
    assert!(host.kv_keys().is_empty());
}

#[tokio::test]
async fn given_other_trigger_when_executed_then_empty_response() {
    let host = seeded_host();
    let state = state(&host, PluginConfiguration::default());

    let response = state.voice_command.execute(&args("/away", None)).await;

    assert_eq!(response, CommandResponse::default());
}

#[tokio::test]
async fn given_config_change_when_applied_then_snapshot_replaced() {
    let host = seeded_host();
    let state = state(&host, PluginConfiguration::default());
    let hooks = PluginHooks::new(&state);

    hooks.on_configuration_change(PluginConfiguration {
        max_recording_duration_seconds: "120".to_string(),
        ..Default::default()
    });

    assert_eq!(state.config.snapshot().max_recording_duration_seconds(), 120);
}

/// Registry that has never seen the triggers, so every unregister fails.
#[derive(Default)]
struct FreshRegistry {
    registered: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl CommandRegistry for FreshRegistry {
    async fn register_command(&self, command: CommandDefinition) -> Result<(), HostError> {
        self.registered.lock().unwrap().push(command.trigger);
        Ok(())
    }

    async fn unregister_command(&self, trigger: &str) -> Result<(), HostError> {
        Err(HostError::NotFound(format!("command {}", trigger)))
    }
}

#[tokio::test]
async fn given_unregister_fails_when_registering_then_both_triggers_still_register() {
    let host = seeded_host();
    let registry = Arc::new(FreshRegistry::default());
    let mut ports = HostPorts::from_host(host);
    ports.commands = registry.clone();
    let state = AppState::new(
        ports,
        Arc::new(ScriptedEngine::returning("unused")),
        config_store(PluginConfiguration::default()),
        site_url(),
    );

    state.voice_command.register().await.unwrap();

    assert_eq!(*registry.registered.lock().unwrap(), vec!["voice", "audiomsg"]);
}
