use crate::{
    CoreResult, RecorderError,
    ffmpeg::{MuxJob, RawVideoWriter, mux_args, raw_writer_args},
};

use std::{
    io::ErrorKind,
    panic::Location,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    time::Instant,
};

use error_location::ErrorLocation;
use tracing::{debug, info, instrument};

/// Handle on the external ffmpeg executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ffmpeg {
    binary: PathBuf,
}

impl Default for Ffmpeg {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Ffmpeg {
    /// Use the executable at `binary`, or a bare name resolved through `PATH`.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Configured executable path.
    pub fn binary(&self) -> &Path {
        &self.binary
    }

    /// `ffprobe` next to the configured ffmpeg, or `ffprobe` on `PATH`.
    pub fn ffprobe(&self) -> PathBuf {
        let name = if cfg!(windows) { "ffprobe.exe" } else { "ffprobe" };
        match self.binary.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.join(name),
            _ => PathBuf::from(name),
        }
    }

    /// First line of `ffmpeg -version`; fails when the executable is missing.
    #[track_caller]
    pub fn version(&self) -> CoreResult<String> {
        let output = Command::new(&self.binary)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.not_found(e))?;

        if !output.status.success() {
            return Err(RecorderError::FfmpegNotFound {
                path: self.binary.clone(),
                reason: format!("-version exited with {}", output.status),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string())
    }

    /// Start an encoder for `width` x `height` BGR24 frames at `fps`.
    #[track_caller]
    pub fn spawn_raw_writer(
        &self,
        output: &Path,
        width: u32,
        height: u32,
        fps: u32,
    ) -> CoreResult<RawVideoWriter> {
        let child = Command::new(&self.binary)
            .args(raw_writer_args(output, width, height, fps))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.not_found(e))?;

        debug!(pid = child.id(), ?output, width, height, fps, "ffmpeg writer started");
        RawVideoWriter::new(child, output.to_path_buf(), width, height)
    }

    /// Encode the intermediate files into the final MP4.
    #[instrument(skip(self, job), fields(output = ?job.output))]
    pub fn mux(&self, job: &MuxJob) -> CoreResult<()> {
        let started = Instant::now();
        let output = Command::new(&self.binary)
            .args(mux_args(job))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.not_found(e))?;

        if !output.status.success() {
            return Err(RecorderError::EncoderError {
                reason: format!(
                    "Mux exited with {}: {}",
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        info!(
            with_audio = job.audio.is_some(),
            elapsed_ms = started.elapsed().as_millis(),
            "Mux complete"
        );
        Ok(())
    }

    #[track_caller]
    fn not_found(&self, e: std::io::Error) -> RecorderError {
        match e.kind() {
            ErrorKind::NotFound | ErrorKind::PermissionDenied => RecorderError::FfmpegNotFound {
                path: self.binary.clone(),
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
            _ => RecorderError::IoError {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}
