//! Image attachments, stored inline as `data:` URIs.

use crate::error::ImageError;
use base64::{engine::general_purpose::STANDARD, Engine};

/// Encode an uploaded file as a data URI after checking its type and size.
pub fn image_data_uri(content_type: &str, bytes: &[u8], limit: usize) -> Result<String, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }

    let mime = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    if !is_image_mime(&mime) {
        return Err(ImageError::NotAnImage(content_type.to_string()));
    }

    if bytes.len() > limit {
        return Err(ImageError::TooLarge {
            size: bytes.len(),
            limit,
        });
    }

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

fn is_image_mime(mime: &str) -> bool {
    match mime.strip_prefix("image/") {
        Some(subtype) => {
            !subtype.is_empty()
                && subtype
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '-'))
        }
        None => false,
    }
}

/// Check that a stored value is a base64 image data URI safe to put in `src`.
pub fn is_image_data_uri(value: &str) -> bool {
    let Some(rest) = value.strip_prefix("data:") else {
        return false;
    };
    let Some((mime, payload)) = rest.split_once(";base64,") else {
        return false;
    };
    is_image_mime(mime)
        && !payload.is_empty()
        && payload
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
}
