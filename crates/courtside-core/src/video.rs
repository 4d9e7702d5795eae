//! Clip handle passed into the pipeline.

use std::path::Path;

use crate::classifier::Frame;
use crate::domain::{CourtsideError, Result};

/// A clip to analyze: its client-supplied name and any still frames
/// already extracted from it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoInput {
    pub file_name: String,
    pub frames: Vec<Frame>,
}

impl VideoInput {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            frames: Vec::new(),
        }
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    pub fn with_frames(mut self, frames: impl IntoIterator<Item = Frame>) -> Self {
        self.frames.extend(frames);
        self
    }

    /// Open a clip on disk.
    ///
    /// The file must exist and be readable; anything else is reported as
    /// [`CourtsideError::AnalysisFailed`].
    pub fn open(path: &Path) -> Result<Self> {
        let failed = |reason: String| {
            CourtsideError::AnalysisFailed(format!("{}: {reason}", path.display()))
        };

        let metadata = std::fs::metadata(path).map_err(|e| failed(e.to_string()))?;
        if !metadata.is_file() {
            return Err(failed("not a regular file".to_string()));
        }
        std::fs::File::open(path).map_err(|e| failed(e.to_string()))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Self::new(file_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_reads_file_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("u12_passing.mp4");
        std::fs::write(&path, b"not really a video").expect("write");

        let video = VideoInput::open(&path).expect("open");
        assert_eq!(video.file_name, "u12_passing.mp4");
        assert!(video.frames.is_empty());
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = VideoInput::open(&dir.path().join("missing.mp4")).expect_err("must fail");
        assert!(matches!(err, CourtsideError::AnalysisFailed(_)));
    }

    #[test]
    fn test_open_directory_fails() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = VideoInput::open(dir.path()).expect_err("must fail");
        assert!(err.to_string().contains("not a regular file"));
    }
}
