pub mod display;

pub use display::{JoinStyle, format_attachments, format_defaults, format_tracks, strip_markup};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of an elementary stream inside a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
    Subtitle,
}

impl TrackKind {
    /// All kinds, in extraction order
    pub const ALL: [TrackKind; 3] = [TrackKind::Video, TrackKind::Audio, TrackKind::Subtitle];

    /// Parse the `type` string used by mkvmerge's JSON identification
    pub fn from_probe_type(s: &str) -> Option<Self> {
        match s {
            "video" => Some(TrackKind::Video),
            "audio" => Some(TrackKind::Audio),
            "subtitles" => Some(TrackKind::Subtitle),
            _ => None,
        }
    }

    /// The probe's own name for this kind
    pub fn probe_type(&self) -> &'static str {
        match self {
            TrackKind::Video => "video",
            TrackKind::Audio => "audio",
            TrackKind::Subtitle => "subtitles",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            TrackKind::Video => "Video",
            TrackKind::Audio => "Audio",
            TrackKind::Subtitle => "Subtitles",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Kind-specific track properties
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackDetails {
    Video { display_dimensions: String },
    Audio,
    Subtitle { encoding: String },
}

impl TrackDetails {
    pub fn kind(&self) -> TrackKind {
        match self {
            TrackDetails::Video { .. } => TrackKind::Video,
            TrackDetails::Audio => TrackKind::Audio,
            TrackDetails::Subtitle { .. } => TrackKind::Subtitle,
        }
    }
}

/// One track of a container file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// Track id assigned by the probe tool; may be sparse
    pub id: u32,
    /// Opaque codec identifier, e.g. "AVC/H.264/MPEG-4p10" or "A_AAC"
    pub codec: String,
    /// IETF tag when available, else the legacy code, else empty
    pub language: String,
    /// Human label, may be empty
    pub name: String,
    pub is_default: bool,
    pub details: TrackDetails,
}

impl Track {
    pub fn kind(&self) -> TrackKind {
        self.details.kind()
    }

    pub fn display_dimensions(&self) -> Option<&str> {
        match &self.details {
            TrackDetails::Video { display_dimensions } if !display_dimensions.is_empty() => {
                Some(display_dimensions)
            }
            _ => None,
        }
    }

    pub fn encoding(&self) -> Option<&str> {
        match &self.details {
            TrackDetails::Subtitle { encoding } if !encoding.is_empty() => Some(encoding),
            _ => None,
        }
    }
}

/// A file attached to the container (fonts, cover art, ...)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub id: u32,
    pub file_name: String,
    pub content_type: String,
}
