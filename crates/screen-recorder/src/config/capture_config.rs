use crate::config::{default_fps, default_preview};

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Screen capture configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Declared frame rate of the recording.
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Show the live preview window while recording.
    #[serde(default = "default_preview")]
    pub preview: bool,

    /// Directory for intermediate files (None = working directory).
    #[serde(default)]
    pub intermediate_dir: Option<PathBuf>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            preview: default_preview(),
            intermediate_dir: None,
        }
    }
}
