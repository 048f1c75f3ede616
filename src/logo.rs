//! The singleton logo asset: a binary image carried as a data URI.
//!
//! The logo is process-wide, not tied to any one document; it persists in
//! its own slot and applies to every rendered document.

use std::path::Path;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::EditorError;

/// A validated `data:image/...;base64,` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Logo(String);

impl Logo {
    /// Encode raw image bytes, sniffing the media type from magic bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EditorError> {
        let media_type = sniff_media_type(bytes)
            .ok_or_else(|| EditorError::Logo("unrecognized image format".into()))?;
        Ok(Self(format!(
            "data:{media_type};base64,{}",
            STANDARD.encode(bytes)
        )))
    }

    /// Read an image file and convert it to a data URI. This is the
    /// synchronous upload path: the file is fully converted before use.
    pub fn from_file(path: &Path) -> Result<Self, EditorError> {
        let bytes = std::fs::read(path)
            .map_err(|e| EditorError::Logo(format!("{}: {e}", path.display())))?;
        Self::from_bytes(&bytes)
    }

    /// Validate an already-encoded data URI (the persisted representation).
    pub fn from_data_uri(uri: &str) -> Result<Self, EditorError> {
        let rest = uri
            .strip_prefix("data:image/")
            .ok_or_else(|| EditorError::Logo("not an image data URI".into()))?;
        let (_, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| EditorError::Logo("missing base64 payload".into()))?;
        STANDARD
            .decode(payload)
            .map_err(|e| EditorError::Logo(format!("invalid base64 payload: {e}")))?;
        Ok(Self(uri.to_string()))
    }

    pub fn as_data_uri(&self) -> &str {
        &self.0
    }

    /// The sniffed or declared media type, e.g. "image/png".
    pub fn media_type(&self) -> &str {
        self.0
            .strip_prefix("data:")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or("image/png")
    }
}

fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some("image/gif")
    } else if bytes.len() >= 12 && bytes.starts_with(b"RIFF") && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}
