use std::path::Path;

/// Container formats the transcription service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    Mp3,
    Mp4,
    Wav,
    Flac,
    Ogg,
    Amr,
    Webm,
}

impl MediaFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "mp3" => Some(MediaFormat::Mp3),
            "mp4" | "m4a" => Some(MediaFormat::Mp4),
            "wav" => Some(MediaFormat::Wav),
            "flac" => Some(MediaFormat::Flac),
            "ogg" => Some(MediaFormat::Ogg),
            "amr" => Some(MediaFormat::Amr),
            "webm" => Some(MediaFormat::Webm),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Wire value understood by the service.
    pub fn as_str(self) -> &'static str {
        match self {
            MediaFormat::Mp3 => "mp3",
            MediaFormat::Mp4 => "mp4",
            MediaFormat::Wav => "wav",
            MediaFormat::Flac => "flac",
            MediaFormat::Ogg => "ogg",
            MediaFormat::Amr => "amr",
            MediaFormat::Webm => "webm",
        }
    }
}
