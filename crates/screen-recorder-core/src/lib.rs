//! Screen Recorder Core Library
//!
//! Screen and audio capture for a desktop recorder, built on xcap, CPAL,
//! Rubato and an external ffmpeg for encoding.
//!
//! # Example
//!
//! ```no_run
//! use screen_recorder_core::{
//!     AudioSelection, CoreResult, Ffmpeg, PreviewSlot, Recorder, SessionOptions,
//! };
//!
//! use std::{sync::Arc, thread::sleep, time::Duration};
//!
//! fn main() -> CoreResult<()> {
//!     let mut recorder = Recorder::new(Ffmpeg::default(), Arc::new(PreviewSlot::new(false)));
//!
//!     recorder.start(SessionOptions {
//!         audio: AudioSelection { microphone: true, system: false },
//!         ..SessionOptions::default()
//!     })?;
//!     sleep(Duration::from_secs(5));
//!     let saved = recorder.stop()?;
//!
//!     println!("Saved to {}", saved.path.display());
//!     Ok(())
//! }
//! ```

mod audio;
mod clock;
mod error;
mod ffmpeg;
mod finalize;
mod region;
mod session;
mod video;

pub use {
    audio::{AudioCapture, AudioDevices, AudioSelection, AudioSource, AudioTrack, SourceRecording},
    clock::{SessionClock, format_hms},
    error::{RecorderError, Result as CoreResult},
    ffmpeg::{EncoderSettings, Ffmpeg, MuxJob, ProbedStream, RawVideoWriter, probe_streams},
    finalize::{
        DEFAULT_FILE_NAME_TEMPLATE, Finalizer, IntermediatePaths, OutputTarget, SavedRecording,
        default_destination_dir, output_file_name, unique_path,
    },
    region::{CaptureArea, DragTracker, Region, ScreenPoint},
    session::{
        CancelHandle, CancelToken, DEFAULT_FPS, PreviewSlot, Recorder, SessionControl,
        SessionOptions, SessionPhase,
    },
    video::{FrameSink, ScreenSource, VideoFrame, VideoStats, XcapScreen},
};

/// Input device names visible to the default host; the configured
/// microphone and system devices are matched against these.
pub fn list_input_devices() -> Vec<String> {
    audio::input_device_names()
}

#[cfg(test)]
mod tests;
