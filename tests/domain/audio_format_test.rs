use voice_message::domain::{AudioFormat, extension_for_content_type};

#[test]
fn given_content_type_with_codec_parameter_when_parsing_then_ignores_parameter() {
    assert_eq!(
        AudioFormat::from_content_type("Audio/WebM; codecs=opus"),
        Some(AudioFormat::Webm)
    );
}

#[test]
fn given_known_types_when_mapping_extension_then_matches_table() {
    assert_eq!(extension_for_content_type("audio/webm"), ".webm");
    assert_eq!(extension_for_content_type("audio/ogg"), ".ogg");
    assert_eq!(extension_for_content_type("video/mp4"), ".m4a");
    assert_eq!(extension_for_content_type("audio/mpeg"), ".mp3");
    assert_eq!(extension_for_content_type("audio/x-wav"), ".wav");
    assert_eq!(extension_for_content_type("audio/flac"), ".flac");
}

#[test]
fn given_unknown_type_when_mapping_extension_then_returns_bin() {
    assert_eq!(extension_for_content_type("application/octet-stream"), ".bin");
    assert_eq!(extension_for_content_type(""), ".bin");
}

#[test]
fn given_filename_when_detecting_format_then_uses_extension() {
    assert_eq!(AudioFormat::from_filename("voice.M4A"), Some(AudioFormat::Mp4));
    assert_eq!(AudioFormat::from_filename("voice.mp3").map(|f| f.as_mime()), Some("audio/mpeg"));
    assert_eq!(AudioFormat::from_filename("voice.txt"), None);
}
