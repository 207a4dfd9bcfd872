use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::DateTime;
use serde::{Deserialize, Serialize};

/// Scene identifier: capture time in nanoseconds since the Unix epoch.
pub type Timestamp = i64;

/// Encoded image bytes (PNG, JPEG, ...) carried as base64 for embedding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EncodedImage {
    pub content_type: String,
    pub data: String,
}

impl EncodedImage {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            content_type: sniff_content_type(bytes).to_string(),
            data: STANDARD.encode(bytes),
        }
    }

    /// Wraps data that is already base64; the content type is sniffed from
    /// the decoded prefix when possible.
    pub fn from_base64(data: &str) -> Self {
        let data = data.trim();
        let head = &data.as_bytes()[..data.len().min(16)];
        let content_type = STANDARD
            .decode(head)
            .map(|bytes| sniff_content_type(&bytes))
            .unwrap_or(OCTET_STREAM);
        Self {
            content_type: content_type.to_string(),
            data: data.to_string(),
        }
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.content_type, self.data)
    }
}

const OCTET_STREAM: &str = "application/octet-stream";

fn sniff_content_type(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "image/png",
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [b'G', b'I', b'F', b'8', ..] => "image/gif",
        [b'B', b'M', ..] => "image/bmp",
        _ => OCTET_STREAM,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SceneImage {
    pub timestamp: Timestamp,
    pub image: EncodedImage,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObjectAttribute {
    pub name: String,
    pub value: String,
}

/// A record of the persistent object store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistentObject {
    pub id: String,
    pub timestamp: Option<Timestamp>,
    pub image: Option<EncodedImage>,
    /// Remaining document fields in stored order, rendered as text.
    pub attributes: Vec<ObjectAttribute>,
}

/// Human readable UTC capture time.
pub fn format_timestamp(ts: Timestamp) -> String {
    DateTime::from_timestamp_nanos(ts)
        .format("%Y-%m-%d %H:%M:%S%.3f UTC")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn png_bytes_become_png_data_uri() {
        let img = EncodedImage::from_bytes(&PNG_HEADER);
        assert_eq!(img.content_type, "image/png");
        assert_eq!(img.data_uri(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn base64_input_is_sniffed_after_decoding() {
        let img = EncodedImage::from_base64("/9j/4AAQSkZJRgABAQ==");
        assert_eq!(img.content_type, "image/jpeg");

        let junk = EncodedImage::from_base64("not base64 at all!");
        assert_eq!(junk.content_type, "application/octet-stream");
    }

    #[test]
    fn timestamps_are_shown_in_utc() {
        assert_eq!(
            format_timestamp(1_500_000_000_123_000_000),
            "2017-07-14 02:40:00.123 UTC"
        );
    }
}
