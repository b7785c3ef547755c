//! Recording configuration.

use std::path::PathBuf;

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Output directory for the capture artifact
    pub output_dir: PathBuf,

    /// File name of the WAV written on stop
    pub file_name: String,
}

impl RecordingConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_name: "capture.wav".to_string(),
        }
    }

    /// Audio file path
    pub fn audio_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}

impl Default for RecordingConfig {
    fn default() -> Self {
        Self::new("recording")
    }
}
