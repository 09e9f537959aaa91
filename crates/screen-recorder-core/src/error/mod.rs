use crate::session::SessionPhase;

use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Recording pipeline errors with source location tracking.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// Selected region has no area.
    #[error("Region {width}x{height} has no capturable area {location}")]
    EmptyRegion {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No display available to capture from.
    #[error("No display found {location}")]
    NoDisplayFound {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Grabbing pixels from the screen failed.
    #[error("Screen capture failed: {reason} {location}")]
    CaptureFailed {
        /// Description of the capture failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio device operation failed.
    #[error("Audio device error: {reason} {location}")]
    DeviceError {
        /// Description of the device error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Audio resampling failed.
    #[error("Resampling error: {reason} {location}")]
    ResamplingError {
        /// Description of the resampling error.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The ffmpeg binary could not be started.
    #[error("ffmpeg not found at {path:?}: {reason} {location}")]
    FfmpegNotFound {
        /// Binary that was looked up.
        path: PathBuf,
        /// Why the lookup failed.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Encoding or muxing failed.
    #[error("Encoder error: {reason} {location}")]
    EncoderError {
        /// Description of the encoder failure, including ffmpeg output.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recording was stopped before any frame reached the encoder.
    #[error("No frames captured {location}")]
    NoFramesCaptured {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The finished recording could not be moved into place.
    #[error("Could not save recording to {destination:?}, kept at {kept:?}: {reason} {location}")]
    SaveFailed {
        /// Where the finished file was left.
        kept: PathBuf,
        /// Where it should have gone.
        destination: PathBuf,
        /// Why the move failed.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A session is already active.
    #[error("A recording session is already active {location}")]
    AlreadyRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Operation requires an active session.
    #[error("No active recording session {location}")]
    NotRecording {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Requested session transition is not allowed.
    #[error("Invalid session transition {from:?} -> {to:?} {location}")]
    InvalidTransition {
        /// Phase the session was in.
        from: SessionPhase,
        /// Phase that was requested.
        to: SessionPhase,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A capture worker thread panicked.
    #[error("Worker thread '{worker}' panicked {location}")]
    WorkerPanicked {
        /// Name of the worker.
        worker: &'static str,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// WAV read/write failure.
    #[error("WAV error: {source} {location}")]
    WavError {
        /// Underlying error from hound.
        #[source]
        source: hound::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// IO error from filesystem or process operations.
    #[error("IO error: {source} {location}")]
    IoError {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for RecorderError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        RecorderError::IoError {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

impl From<hound::Error> for RecorderError {
    #[track_caller]
    fn from(source: hound::Error) -> Self {
        RecorderError::WavError {
            source,
            location: ErrorLocation::from(std::panic::Location::caller()),
        }
    }
}

/// Result type alias using [`RecorderError`].
pub type Result<T> = std::result::Result<T, RecorderError>;
