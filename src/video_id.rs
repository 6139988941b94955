//! Video identifier extraction.
//!
//! Pulls the canonical 11-character identifier out of whatever the user
//! pasted into the URL field. A miss is a normal outcome, not an error.

use regex::Regex;
use std::sync::OnceLock;

/// Length of a canonical video identifier.
pub const VIDEO_ID_LEN: usize = 11;

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?:^|[/.])(?:youtube(?:-nocookie)?\.com/(?:[^/\n\s]+/\S+/|(?:v|e(?:mbed)?|shorts|live)/|\S*?[?&]v=)|youtu\.be/)([A-Za-z0-9_-]{11})",
        )
        .expect("video url pattern is valid")
    })
}

fn bare_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("video id pattern is valid"))
}

/// Check whether `s` is exactly a well-formed identifier.
pub fn is_valid_video_id(s: &str) -> bool {
    bare_pattern().is_match(s)
}

/// Extract a video identifier from a URL or a bare token.
///
/// Recognized shapes:
/// - `youtube.com/watch?v=<id>` (and any other `v=` query parameter)
/// - `youtu.be/<id>`
/// - `youtube.com/embed/<id>`, `/e/<id>`, `/v/<id>`, `/shorts/<id>`
/// - a bare `<id>` token
///
/// Returns `None` when no shape matches.
pub fn extract_video_id(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if is_valid_video_id(trimmed) {
        return Some(trimmed.to_string());
    }

    url_pattern()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
