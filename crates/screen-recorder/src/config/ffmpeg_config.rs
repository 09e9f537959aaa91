use std::path::PathBuf;

use screen_recorder_core::EncoderSettings;
use serde::{Deserialize, Serialize};

/// External encoder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FfmpegConfig {
    /// Path to the ffmpeg executable (None = `ffmpeg` on PATH).
    #[serde(default)]
    pub binary: Option<PathBuf>,

    /// Final video codec.
    #[serde(default = "default_codec")]
    pub codec: String,

    /// Constant rate factor for x264/x265.
    #[serde(default = "default_crf")]
    pub crf: u8,

    /// x264/x265 speed preset.
    #[serde(default = "default_preset")]
    pub preset: String,

    /// AAC bitrate.
    #[serde(default = "default_audio_bitrate")]
    pub audio_bitrate: String,
}

impl Default for FfmpegConfig {
    fn default() -> Self {
        let encoder = EncoderSettings::default();
        Self {
            binary: None,
            codec: encoder.codec,
            crf: encoder.crf,
            preset: encoder.preset,
            audio_bitrate: encoder.audio_bitrate,
        }
    }
}

fn default_codec() -> String {
    EncoderSettings::default().codec
}

fn default_crf() -> u8 {
    EncoderSettings::default().crf
}

fn default_preset() -> String {
    EncoderSettings::default().preset
}

fn default_audio_bitrate() -> String {
    EncoderSettings::default().audio_bitrate
}
