use crate::{
    audio::{AudioDevices, AudioSelection},
    ffmpeg::EncoderSettings,
    finalize::OutputTarget,
    region::CaptureArea,
};

use std::path::PathBuf;

/// Capture rate used when nothing else is configured.
pub const DEFAULT_FPS: u32 = 20;

/// Everything a session needs to know before it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Full screen or a selected rectangle.
    pub area: CaptureArea,
    /// Which audio sources to record.
    pub audio: AudioSelection,
    /// Preferred device names per source.
    pub devices: AudioDevices,
    /// Declared capture and playback frame rate.
    pub fps: u32,
    /// Directory for intermediate files.
    pub intermediate_dir: PathBuf,
    /// Final encode settings.
    pub encoder: EncoderSettings,
    /// Destination of the saved file.
    pub output: OutputTarget,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            area: CaptureArea::default(),
            audio: AudioSelection::default(),
            devices: AudioDevices::default(),
            fps: DEFAULT_FPS,
            intermediate_dir: PathBuf::from("."),
            encoder: EncoderSettings::default(),
            output: OutputTarget::default(),
        }
    }
}
