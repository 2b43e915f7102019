/// Accepted upload formats, matched case-insensitively on the final
/// file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    Mp3,
    Wav,
    Mp4,
    M4a,
    Ogg,
}

impl AudioFormat {
    pub const ALLOWED_EXTENSIONS: [&'static str; 5] = ["mp3", "wav", "mp4", "m4a", "ogg"];

    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "mp4" => Some(Self::Mp4),
            "m4a" => Some(Self::M4a),
            "ogg" => Some(Self::Ogg),
            _ => None,
        }
    }

    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        Self::from_extension(ext)
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Mp4 => "audio/mp4",
            Self::M4a => "audio/mp4",
            Self::Ogg => "audio/ogg",
        }
    }

    /// MIME type for serving a stored blob. Unknown extensions fall back to
    /// a generic audio type rather than failing the request.
    pub fn mime_for_stored(file_name: &str) -> &'static str {
        Self::from_file_name(file_name)
            .map(|f| f.as_mime())
            .unwrap_or("audio/mpeg")
    }
}
