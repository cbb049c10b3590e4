use std::sync::Arc;

use voice_message::application::ports::{PostStore, TranscriptionEngine, TranscriptionError};
use voice_message::application::services::{TranscribePostError, TranscriptionService};
use voice_message::domain::{ChannelId, FileId, Post, PostId, UserId};
use voice_message::infrastructure::host::InMemoryHost;

use crate::helpers::fixtures::{
    ALICE, BOB, TEST_API_KEY, config_store, seed_voice_post, seeded_host, transcription_settings,
};
use crate::helpers::scripted_engine::ScriptedEngine;

fn service(
    host: &Arc<InMemoryHost>,
    engine: &Arc<ScriptedEngine>,
    max_duration: &str,
) -> TranscriptionService {
    let mut settings = transcription_settings("http://127.0.0.1:9/unused");
    settings.transcription_max_duration_seconds = max_duration.to_string();
    let engine: Arc<dyn TranscriptionEngine> = engine.clone();
    TranscriptionService::new(
        config_store(settings),
        host.clone(),
        host.clone(),
        host.clone(),
        engine,
    )
}

#[tokio::test]
async fn given_untranscribed_post_when_transcribing_twice_then_second_call_is_cached() {
    let host = seeded_host();
    let engine = Arc::new(ScriptedEngine::returning("hello world"));
    let service = service(&host, &engine, "300");
    let post = seed_voice_post(&host, "4.2", b"opus");

    let first = service
        .transcribe_post(&UserId::new(ALICE), &post.id)
        .await
        .unwrap();
    let second = service
        .transcribe_post(&UserId::new(ALICE), &post.id)
        .await
        .unwrap();

    assert_eq!(first.transcript, "hello world");
    assert!(!first.cached);
    assert_eq!(second.transcript, "hello world");
    assert!(second.cached);
    assert_eq!(engine.calls(), 1);
    assert_eq!(host.post(&post.id).unwrap().transcript(), Some("hello world"));
}

#[tokio::test]
async fn given_stored_transcript_when_transcribing_then_provider_is_not_called() {
    let host = seeded_host();
    let engine = Arc::new(ScriptedEngine::returning("fresh"));
    let service = service(&host, &engine, "300");
    let mut post = seed_voice_post(&host, "4", b"opus");
    post.set_transcript("already here");
    host.update_post(&post).await.unwrap();

    let outcome = service
        .transcribe_post(&UserId::new(ALICE), &post.id)
        .await
        .unwrap();

    assert_eq!(outcome.transcript, "already here");
    assert!(outcome.cached);
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_recording_over_limit_when_transcribing_then_rejected_before_provider() {
    let host = seeded_host();
    let engine = Arc::new(ScriptedEngine::returning("never"));
    let service = service(&host, &engine, "300");
    let post = seed_voice_post(&host, "400", b"opus");

    let err = service
        .transcribe_post(&UserId::new(ALICE), &post.id)
        .await
        .unwrap_err();

    assert!(matches!(err, TranscribePostError::TooLong { limit: 300, .. }));
    assert_eq!(
        err.to_string(),
        "Voice message too long for transcription (400s > 300s limit)"
    );
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_zero_limit_when_transcribing_long_recording_then_allowed() {
    let host = seeded_host();
    let engine = Arc::new(ScriptedEngine::returning("long one"));
    let service = service(&host, &engine, "0");
    let post = seed_voice_post(&host, "5000", b"opus");

    let outcome = service
        .transcribe_post(&UserId::new(ALICE), &post.id)
        .await
        .unwrap();

    assert_eq!(outcome.transcript, "long one");
}

#[tokio::test]
async fn given_non_member_when_transcribing_then_forbidden() {
    let host = seeded_host();
    let engine = Arc::new(ScriptedEngine::returning("x"));
    let service = service(&host, &engine, "300");
    let post = seed_voice_post(&host, "4", b"opus");

    let err = service
        .transcribe_post(&UserId::new(BOB), &post.id)
        .await
        .unwrap_err();

    assert!(matches!(err, TranscribePostError::Forbidden(_)));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_unknown_post_when_transcribing_then_not_found() {
    let host = seeded_host();
    let engine = Arc::new(ScriptedEngine::returning("x"));
    let service = service(&host, &engine, "300");

    let err = service
        .transcribe_post(&UserId::new(ALICE), &PostId::new("missing"))
        .await
        .unwrap_err();

    assert!(matches!(err, TranscribePostError::PostNotFound(_)));
}

#[tokio::test]
async fn given_regular_post_when_transcribing_then_not_voice_message() {
    let host = seeded_host();
    let engine = Arc::new(ScriptedEngine::returning("x"));
    let service = service(&host, &engine, "300");
    let mut post = Post::new_voice_message(
        UserId::new(ALICE),
        ChannelId::new("town-square"),
        None,
        FileId::new("f"),
        "1",
        "audio/webm",
    );
    post.post_type = String::new();
    host.insert_post(post.clone());

    let err = service
        .transcribe_post(&UserId::new(ALICE), &post.id)
        .await
        .unwrap_err();

    assert!(matches!(err, TranscribePostError::NotVoiceMessage(_)));
}

#[tokio::test]
async fn given_missing_audio_file_when_transcribing_then_audio_unavailable() {
    let host = seeded_host();
    let engine = Arc::new(ScriptedEngine::returning("x"));
    let service = service(&host, &engine, "300");
    let post = Post::new_voice_message(
        UserId::new(ALICE),
        ChannelId::new("town-square"),
        None,
        FileId::new("gone"),
        "1",
        "audio/webm",
    );
    host.insert_post(post.clone());

    let err = service
        .transcribe_post(&UserId::new(ALICE), &post.id)
        .await
        .unwrap_err();

    assert!(matches!(err, TranscribePostError::AudioUnavailable(_)));
    assert_eq!(engine.calls(), 0);
}

#[tokio::test]
async fn given_disabled_transcription_when_transcribing_then_disabled() {
    let host = seeded_host();
    let engine: Arc<dyn TranscriptionEngine> = Arc::new(ScriptedEngine::returning("x"));
    let service = TranscriptionService::new(
        config_store(Default::default()),
        host.clone(),
        host.clone(),
        host.clone(),
        engine,
    );
    let post = seed_voice_post(&host, "1", b"opus");

    let err = service
        .transcribe_post(&UserId::new(ALICE), &post.id)
        .await
        .unwrap_err();

    assert!(matches!(err, TranscribePostError::Disabled));
    assert!(!service.is_enabled());
}

#[tokio::test]
async fn given_provider_error_echoing_key_when_transcribing_then_error_is_redacted() {
    let host = seeded_host();
    let engine = Arc::new(ScriptedEngine::failing(TranscriptionError::Api {
        status: 401,
        body: format!("invalid api key {}", TEST_API_KEY),
    }));
    let service = service(&host, &engine, "300");
    let post = seed_voice_post(&host, "3", b"opus");

    let err = service
        .transcribe_post(&UserId::new(ALICE), &post.id)
        .await
        .unwrap_err();

    let TranscribePostError::Transcription(inner) = err else {
        panic!("expected transcription error");
    };
    assert!(!inner.to_string().contains(TEST_API_KEY));
    assert_eq!(inner.user_message(), "Transcription API auth failed.");
    assert_eq!(host.post(&post.id).unwrap().transcript(), None);
}
