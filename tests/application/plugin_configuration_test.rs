use voice_message::application::config::{ConfigStore, PluginConfiguration};
use voice_message::domain::{DEEPINFRA_ENDPOINT, OPENAI_ENDPOINT, TranscriptionProvider};

#[test]
fn given_empty_settings_when_resolving_then_uses_defaults() {
    let config = PluginConfiguration::default();

    assert_eq!(config.max_recording_duration_seconds(), 600);
    assert_eq!(config.max_file_size_bytes(), 50 * 1024 * 1024);
    assert_eq!(config.mobile_token_ttl_seconds(), 900);
    assert_eq!(config.transcription_max_duration_seconds(), 300);
    assert_eq!(config.allowed_roles(), "all");
    assert_eq!(config.provider(), TranscriptionProvider::DeepInfra);
    assert_eq!(config.transcription_endpoint(), DEEPINFRA_ENDPOINT);
    assert_eq!(config.transcription_model(), "openai/whisper-large-v3-turbo");
    assert!(!config.transcription_enabled());
    assert!(!config.auto_transcribe_enabled());
}

#[test]
fn given_malformed_or_negative_numbers_when_resolving_then_falls_back_silently() {
    let config = PluginConfiguration {
        max_recording_duration_seconds: "ten minutes".to_string(),
        max_file_size_mb: "0".to_string(),
        mobile_token_ttl_seconds: "-5".to_string(),
        transcription_max_duration_seconds: "12.5".to_string(),
        ..Default::default()
    };

    assert_eq!(config.max_recording_duration_seconds(), 600);
    assert_eq!(config.max_file_size_bytes(), 50 * 1024 * 1024);
    assert_eq!(config.mobile_token_ttl_seconds(), 900);
    assert_eq!(config.transcription_max_duration_seconds(), 300);
}

#[test]
fn given_valid_numbers_when_resolving_then_uses_them() {
    let config = PluginConfiguration {
        max_recording_duration_seconds: " 120 ".to_string(),
        max_file_size_mb: "5".to_string(),
        transcription_max_duration_seconds: "0".to_string(),
        ..Default::default()
    };

    assert_eq!(config.max_recording_duration_seconds(), 120);
    assert_eq!(config.max_file_size_bytes(), 5 * 1024 * 1024);
    assert_eq!(config.transcription_max_duration_seconds(), 0);
}

#[test]
fn given_custom_provider_when_resolving_endpoint_then_uses_trimmed_service_url() {
    let config = PluginConfiguration {
        transcription_provider: "Custom".to_string(),
        transcription_service_url: "  https://stt.internal/v1/audio/transcriptions ".to_string(),
        ..Default::default()
    };

    assert_eq!(
        config.transcription_endpoint(),
        "https://stt.internal/v1/audio/transcriptions"
    );
}

#[test]
fn given_custom_provider_without_url_when_resolving_then_endpoint_is_empty() {
    let config = PluginConfiguration {
        transcription_provider: "custom".to_string(),
        ..Default::default()
    };

    assert_eq!(config.transcription_endpoint(), "");
}

#[test]
fn given_unknown_provider_when_resolving_then_deepinfra_endpoint_and_shape() {
    let config = PluginConfiguration {
        transcription_provider: "whisper.cpp".to_string(),
        transcription_service_url: "http://ignored".to_string(),
        ..Default::default()
    };

    let resolved = config.transcription_config();

    assert_eq!(resolved.provider, TranscriptionProvider::DeepInfra);
    assert_eq!(resolved.endpoint, DEEPINFRA_ENDPOINT);
}

#[test]
fn given_host_pascal_case_payload_when_deserializing_then_fields_are_read() {
    let payload = r#"{
        "MaxRecordingDurationSeconds": "90",
        "AllowedRoles": "system_admin",
        "EnableTranscription": true,
        "TranscriptionProvider": "openai",
        "TranscriptionAPIKey": " sk-0123456789 ",
        "AutoTranscribe": true
    }"#;

    let config: PluginConfiguration = serde_json::from_str(payload).unwrap();

    assert_eq!(config.max_recording_duration_seconds(), 90);
    assert_eq!(config.allowed_roles(), "system_admin");
    assert_eq!(config.transcription_endpoint(), OPENAI_ENDPOINT);
    assert_eq!(config.api_key(), "sk-0123456789");
    assert!(config.auto_transcribe_enabled());
}

#[test]
fn given_auto_transcribe_without_key_when_checking_then_disabled() {
    let config = PluginConfiguration {
        enable_transcription: true,
        auto_transcribe: true,
        transcription_api_key: "   ".to_string(),
        ..Default::default()
    };

    assert!(!config.auto_transcribe_enabled());
}

#[test]
fn given_configuration_when_debug_formatting_then_key_is_redacted() {
    let config = PluginConfiguration {
        transcription_api_key: "sk-super-secret-key".to_string(),
        ..Default::default()
    };

    let rendered = format!("{:?} {:?}", config, config.transcription_config());

    assert!(!rendered.contains("sk-super-secret-key"));
}

#[test]
fn given_snapshot_when_store_replaced_then_old_snapshot_is_unchanged() {
    let store = ConfigStore::default();
    let before = store.snapshot();

    store.replace(PluginConfiguration {
        max_recording_duration_seconds: "30".to_string(),
        ..Default::default()
    });

    assert_eq!(before.max_recording_duration_seconds(), 600);
    assert_eq!(store.snapshot().max_recording_duration_seconds(), 30);
}
