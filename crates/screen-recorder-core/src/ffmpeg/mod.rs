mod args;
mod binary;
mod probe;
mod stderr;
mod writer;

pub(crate) use {
    args::{mux_args, raw_writer_args},
    probe::parse_compact_streams,
};

pub use {
    binary::Ffmpeg,
    probe::{ProbedStream, probe_streams},
    writer::RawVideoWriter,
};

use std::path::PathBuf;

/// Settings for the final MP4 encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderSettings {
    /// ffmpeg video codec name.
    pub codec: String,
    /// Constant rate factor for x264/x265.
    pub crf: u8,
    /// x264/x265 speed preset.
    pub preset: String,
    /// AAC bitrate, e.g. `192k`.
    pub audio_bitrate: String,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        Self {
            codec: "libx264".to_string(),
            crf: 23,
            preset: "veryfast".to_string(),
            audio_bitrate: "192k".to_string(),
        }
    }
}

/// Inputs and output of one mux run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MuxJob {
    /// Intermediate video.
    pub video: PathBuf,
    /// Intermediate audio, when any source was recorded.
    pub audio: Option<PathBuf>,
    /// Final file.
    pub output: PathBuf,
    /// Encoder settings.
    pub settings: EncoderSettings,
}
