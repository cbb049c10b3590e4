use voice_message::domain::{
    ChannelId, FileId, PROP_VOICE_DURATION, PROP_VOICE_MIME_TYPE, Post, UserId,
    VOICE_MESSAGE_POST_TYPE, normalize_duration,
};

fn post(duration: &str) -> Post {
    Post::new_voice_message(
        UserId::new("u1"),
        ChannelId::new("c1"),
        None,
        FileId::new("f1"),
        duration,
        "audio/ogg",
    )
}

#[test]
fn given_new_voice_message_when_created_then_carries_type_file_and_props() {
    let post = post("12.5");

    assert_eq!(post.post_type, VOICE_MESSAGE_POST_TYPE);
    assert!(post.is_voice_message());
    assert_eq!(post.audio_file_id(), Some(&FileId::new("f1")));
    assert_eq!(post.props[PROP_VOICE_DURATION], "12.5");
    assert_eq!(post.props[PROP_VOICE_MIME_TYPE], "audio/ogg");
    assert_eq!(post.id.as_str().len(), 26);
    assert_eq!(post.transcript(), None);
}

#[test]
fn given_plain_post_when_checking_type_then_is_not_voice_message() {
    let mut post = post("1");
    post.post_type = String::new();

    assert!(!post.is_voice_message());
}

#[test]
fn given_blank_transcript_when_reading_then_treated_as_absent() {
    let mut post = post("1");
    post.set_transcript("   ");
    assert_eq!(post.transcript(), None);

    post.set_transcript("hello");
    assert_eq!(post.transcript(), Some("hello"));
}

#[test]
fn given_unparseable_duration_when_reading_then_zero() {
    assert_eq!(post("abc").duration_seconds(), 0.0);
    assert_eq!(post("400").duration_seconds(), 400.0);
}

#[test]
fn given_client_durations_when_normalizing_then_keeps_only_finite_numbers() {
    assert_eq!(normalize_duration(Some("7.25")), "7.25");
    assert_eq!(normalize_duration(Some(" 3 ")), "3");
    assert_eq!(normalize_duration(Some("NaN")), "0");
    assert_eq!(normalize_duration(Some("inf")), "0");
    assert_eq!(normalize_duration(Some("ten")), "0");
    assert_eq!(normalize_duration(None), "0");
}
