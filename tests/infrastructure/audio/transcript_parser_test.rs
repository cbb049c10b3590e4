use voice_message::application::ports::FailureKind;
use voice_message::infrastructure::audio::parse_transcript;

#[test]
fn given_text_field_when_parsing_then_returns_trimmed_text() {
    assert_eq!(parse_transcript(r#"{"text": "  hello there \n"}"#).unwrap(), "hello there");
}

#[test]
fn given_text_and_segments_when_parsing_then_text_wins() {
    let body = r#"{"text": "full", "segments": [{"text": "part"}]}"#;

    assert_eq!(parse_transcript(body).unwrap(), "full");
}

#[test]
fn given_missing_text_when_parsing_then_falls_back_to_segments() {
    let body = r#"{"segments": [{"text": " one "}, {"start": 1.0}, {"text": "two"}]}"#;

    assert_eq!(parse_transcript(body).unwrap(), "one two");
}

#[test]
fn given_blank_segments_when_parsing_then_reports_missing_transcript() {
    let err = parse_transcript(r#"{"text": " ", "segments": [{"text": ""}]}"#).unwrap_err();

    assert_eq!(err.kind(), FailureKind::Parse);
    assert!(err.to_string().starts_with("parse_error: no transcript text found"));
}

#[test]
fn given_invalid_json_when_parsing_then_reports_invalid_json_with_short_preview() {
    let body = format!("<html>{}</html>", "x".repeat(1000));

    let message = parse_transcript(&body).unwrap_err().to_string();

    assert!(message.starts_with("parse_error: invalid JSON"));
    assert!(message.contains('…'));
    assert!(message.len() < 400);
}

#[test]
fn given_json_array_when_parsing_then_reports_invalid_json() {
    let message = parse_transcript(r#"["text"]"#).unwrap_err().to_string();

    assert!(message.contains("invalid JSON"));
}
