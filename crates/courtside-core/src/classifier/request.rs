//! Request contract for the external classifier.

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::domain::{CourtsideError, Result};

/// Maximum number of frames sent per request.
pub const MAX_FRAMES: usize = 3;

/// MIME type assumed when a frame does not declare one.
pub const DEFAULT_FRAME_MIME: &str = "image/jpeg";

/// Fixed instructional prompt sent with every request.
pub const CLASSIFICATION_PROMPT: &str = r#"You are a handball coach analyzing short video frames. Focus on player movement mechanics (body position, footwork, timing, ball control, follow-through, throwing mechanics).
Tasks:
1) Decide if the scene is handball (court markings, goals, ball, or players doing handball actions).
2) Identify the primary action(s) observed from this set (use these exact labels): [passing, feint, footwork, shooting, defense, goalkeeper, drill, throwing].
3) Estimate the skill level: one of [beginner, intermediate, advanced].
4) Provide exactly 3 concise positives and exactly 3 concise improvements. One sentence each.
5) If handball, also include up to 2-3 skill tags from [passing, feint, footwork, shooting, defense, throwing].
Return STRICT JSON only:
{
  "isHandball": boolean,
  "confidence": number,
  "level": "beginner|intermediate|advanced",
  "actions": [{ "label": "passing|feint|footwork|shooting|defense|goalkeeper|drill|throwing", "confidence": number }],
  "tags": string[],
  "positives": string[],
  "improvements": string[]
}"#;

/// A still image taken from the clip, base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub mime_type: String,
    /// Standard base64 without a data-URL prefix.
    pub data: String,
}

impl Frame {
    pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.to_string(),
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` URL.
    ///
    /// Input without a comma is taken as a bare payload; a missing MIME type
    /// falls back to [`DEFAULT_FRAME_MIME`].
    pub fn from_data_url(url: &str) -> Self {
        let (meta, payload) = match url.split_once(',') {
            Some((meta, payload)) => (meta, payload),
            None => ("", url),
        };
        let mime_type = meta
            .strip_prefix("data:")
            .and_then(|rest| rest.strip_suffix(";base64"))
            .filter(|mime| !mime.is_empty())
            .unwrap_or(DEFAULT_FRAME_MIME);
        Self {
            mime_type: mime_type.to_string(),
            data: payload.to_string(),
        }
    }

    /// Read an image file, inferring the MIME type from its extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            CourtsideError::AnalysisFailed(format!("cannot read frame {}: {e}", path.display()))
        })?;
        Ok(Self::from_bytes(mime_for_path(path), &bytes))
    }
}

fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => DEFAULT_FRAME_MIME,
    }
}

/// One classification request: the prompt plus up to [`MAX_FRAMES`] frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierRequest {
    pub prompt: String,
    pub frames: Vec<Frame>,
}

impl ClassifierRequest {
    pub fn new(frames: &[Frame]) -> Self {
        Self {
            prompt: CLASSIFICATION_PROMPT.to_string(),
            frames: frames.iter().take(MAX_FRAMES).cloned().collect(),
        }
    }

    pub fn has_frames(&self) -> bool {
        !self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes_encodes_base64() {
        let frame = Frame::from_bytes("image/png", b"abc");
        assert_eq!(frame.data, "YWJj");
        assert_eq!(frame.mime_type, "image/png");
    }

    #[test]
    fn test_from_data_url() {
        let frame = Frame::from_data_url("data:image/webp;base64,AAAA");
        assert_eq!(frame.mime_type, "image/webp");
        assert_eq!(frame.data, "AAAA");

        let bare = Frame::from_data_url("BBBB");
        assert_eq!(bare.mime_type, DEFAULT_FRAME_MIME);
        assert_eq!(bare.data, "BBBB");
    }

    #[test]
    fn test_request_caps_frames() {
        let frames: Vec<Frame> = (0..5).map(|_| Frame::from_bytes("image/jpeg", b"x")).collect();
        let request = ClassifierRequest::new(&frames);
        assert_eq!(request.frames.len(), MAX_FRAMES);
        assert!(request.prompt.contains("isHandball"));
    }

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("a.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("noext")), "image/jpeg");
    }
}
