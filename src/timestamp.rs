//! Conversion between playback offsets and display timestamps.

/// Format a playback offset in seconds as `mm:ss`, or `h:mm:ss` from one
/// hour on. Fractional seconds are floored; negative and non-finite values
/// render as `00:00`.
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };

    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Parse `ss`, `mm:ss` or `h:mm:ss` back into seconds.
///
/// Minute and second fields after the first must be below 60.
pub fn parse_timestamp(text: &str) -> Option<f64> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let mut fields = Vec::with_capacity(parts.len());
    for part in &parts {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        fields.push(part.parse::<u64>().ok()?);
    }

    if fields.iter().skip(1).any(|&f| f >= 60) {
        return None;
    }

    let total = fields.iter().fold(0u64, |acc, &f| acc * 60 + f);
    Some(total as f64)
}

/// Clamp a reported playback position to a valid note offset.
pub fn sanitize_offset(seconds: f64) -> f64 {
    if seconds.is_finite() && seconds > 0.0 {
        seconds
    } else {
        0.0
    }
}
