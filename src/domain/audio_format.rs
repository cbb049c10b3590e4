/// Extension used for uploads whose content type is not a known audio type.
pub const UNKNOWN_AUDIO_EXTENSION: &str = ".bin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Webm,
    Ogg,
    Mp4,
    Mpeg,
    Wav,
    Flac,
}

impl AudioFormat {
    /// Parses a `Content-Type` value, ignoring parameters such as `codecs=opus`.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let lowered = content_type.trim().to_lowercase();
        let base = lowered.split(';').next().unwrap_or("").trim();
        match base {
            "audio/webm" => Some(Self::Webm),
            "audio/ogg" | "application/ogg" => Some(Self::Ogg),
            "audio/mp4" | "video/mp4" => Some(Self::Mp4),
            "audio/mpeg" => Some(Self::Mpeg),
            "audio/wav" | "audio/x-wav" => Some(Self::Wav),
            "audio/flac" | "audio/x-flac" => Some(Self::Flac),
            _ => None,
        }
    }

    pub fn from_filename(filename: &str) -> Option<Self> {
        let name = filename.to_lowercase();
        let format = if name.ends_with(".webm") {
            Self::Webm
        } else if name.ends_with(".ogg") {
            Self::Ogg
        } else if name.ends_with(".m4a") || name.ends_with(".mp4") {
            Self::Mp4
        } else if name.ends_with(".mp3") {
            Self::Mpeg
        } else if name.ends_with(".wav") {
            Self::Wav
        } else if name.ends_with(".flac") {
            Self::Flac
        } else {
            return None;
        };
        Some(format)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Webm => ".webm",
            Self::Ogg => ".ogg",
            Self::Mp4 => ".m4a",
            Self::Mpeg => ".mp3",
            Self::Wav => ".wav",
            Self::Flac => ".flac",
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Webm => "audio/webm",
            Self::Ogg => "audio/ogg",
            Self::Mp4 => "audio/mp4",
            Self::Mpeg => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Flac => "audio/flac",
        }
    }
}

pub fn extension_for_content_type(content_type: &str) -> &'static str {
    AudioFormat::from_content_type(content_type)
        .map(|f| f.extension())
        .unwrap_or(UNKNOWN_AUDIO_EXTENSION)
}
