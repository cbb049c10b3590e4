use serde::Deserialize;
use serde_json::{Map, Value};

use crate::application::ports::TranscriptionError;
use crate::infrastructure::observability::preview;

const INVALID_JSON_PREVIEW_CHARS: usize = 200;
const MISSING_TEXT_PREVIEW_CHARS: usize = 300;

#[derive(Deserialize)]
struct Segment {
    #[serde(default)]
    text: String,
}

/// Extracts the transcript from a Whisper-style JSON body.
///
/// A non-blank top-level `text` wins. Otherwise non-blank `segments[].text`
/// values are trimmed and joined with single spaces.
pub fn parse_transcript(body: &str) -> Result<String, TranscriptionError> {
    let document: Map<String, Value> = serde_json::from_str(body).map_err(|e| {
        TranscriptionError::Parse(format!(
            "invalid JSON: {} (body: {})",
            e,
            preview(body, INVALID_JSON_PREVIEW_CHARS)
        ))
    })?;

    if let Some(text) = document.get("text").and_then(Value::as_str) {
        let text = text.trim();
        if !text.is_empty() {
            return Ok(text.to_string());
        }
    }

    if let Some(raw) = document.get("segments") {
        if let Ok(segments) = Vec::<Segment>::deserialize(raw) {
            let joined = segments
                .iter()
                .map(|s| s.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            if !joined.is_empty() {
                return Ok(joined);
            }
        }
    }

    Err(TranscriptionError::Parse(format!(
        "no transcript text found in response (body: {})",
        preview(body, MISSING_TEXT_PREVIEW_CHARS)
    )))
}
