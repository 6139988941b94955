//! Data models for the video notes application.

use serde::{Deserialize, Serialize};

// ============================================================================
// Notes
// ============================================================================

/// A timestamped annotation on one video.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Note {
    /// Unique within the video's collection; milliseconds since epoch at creation.
    pub id: i64,
    /// Playback offset in seconds.
    pub time: f64,
    /// Creation date, e.g. `17 Oct 2026`. Never updated.
    pub date: String,
    /// Rich-text markup produced by the editor widget.
    #[serde(alias = "note")]
    pub content: String,
    /// Optional image as a `data:` URI.
    #[serde(default)]
    pub image: Option<String>,
}

/// Date format used for `Note::date`.
pub const NOTE_DATE_FORMAT: &str = "%d %b %Y";

// ============================================================================
// Video Metadata
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct VideoMetadata {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Display state of the metadata block.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataState {
    /// No lookup has completed for the active video yet.
    Pending,
    Available(VideoMetadata),
    /// The lookup failed; title and description render blank.
    Unavailable(String),
}

impl MetadataState {
    pub fn title(&self) -> &str {
        match self {
            MetadataState::Available(meta) => &meta.title,
            _ => "",
        }
    }

    pub fn description(&self) -> &str {
        match self {
            MetadataState::Available(meta) => &meta.description,
            _ => "",
        }
    }
}

// ============================================================================
// API Bodies
// ============================================================================

/// Body of a successful `/api/video-title` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoTitleResponse {
    pub title: String,
    pub description: String,
}
