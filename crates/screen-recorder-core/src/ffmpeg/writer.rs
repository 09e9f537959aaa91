use crate::{
    CoreResult, RecorderError,
    ffmpeg::stderr::StderrTail,
    video::{FrameSink, VideoFrame},
};

use std::{
    io::Write,
    panic::Location,
    path::PathBuf,
    process::{Child, ChildStdin},
};

use error_location::ErrorLocation;
use tracing::{debug, info, warn};

/// Frame sink backed by an ffmpeg process encoding the intermediate video.
pub struct RawVideoWriter {
    child: Child,
    stdin: Option<ChildStdin>,
    stderr: Option<StderrTail>,
    path: PathBuf,
    frame_len: usize,
    frames: u64,
}

impl RawVideoWriter {
    pub(crate) fn new(
        mut child: Child,
        path: PathBuf,
        width: u32,
        height: u32,
    ) -> CoreResult<Self> {
        let stdin = child.stdin.take();
        let stderr = match child.stderr.take() {
            Some(stderr) => Some(StderrTail::spawn(stderr)?),
            None => None,
        };

        Ok(Self {
            child,
            stdin,
            stderr,
            path,
            frame_len: VideoFrame::expected_len(width, height),
            frames: 0,
        })
    }

    /// Frames written so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    fn stderr_tail(&mut self) -> String {
        self.stderr.take().map(StderrTail::collect).unwrap_or_default()
    }
}

impl FrameSink for RawVideoWriter {
    #[track_caller]
    fn write_frame(&mut self, frame: &VideoFrame) -> CoreResult<()> {
        if frame.data.len() != self.frame_len {
            return Err(RecorderError::EncoderError {
                reason: format!(
                    "Frame is {} bytes, writer expects {}",
                    frame.data.len(),
                    self.frame_len
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let Some(stdin) = self.stdin.as_mut() else {
            return Err(RecorderError::EncoderError {
                reason: "Video writer already closed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        if let Err(e) = stdin.write_all(&frame.data) {
            let tail = self.stderr_tail();
            return Err(RecorderError::EncoderError {
                reason: format!("ffmpeg stopped reading frames: {}\n{}", e, tail),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.frames += 1;
        Ok(())
    }

    #[track_caller]
    fn finish(mut self) -> CoreResult<()> {
        // EOF on stdin tells ffmpeg to flush and write the trailer.
        drop(self.stdin.take());

        let status = self.child.wait()?;
        let tail = self.stderr_tail();

        if !status.success() {
            return Err(RecorderError::EncoderError {
                reason: format!("ffmpeg exited with {}: {}", status, tail),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if !tail.is_empty() {
            debug!(stderr = %tail, "ffmpeg writer output");
        }

        info!(path = ?self.path, frames = self.frames, "Intermediate video closed");
        Ok(())
    }
}

impl Drop for RawVideoWriter {
    fn drop(&mut self) {
        // Dropped without finish(): abandon the encode.
        if self.stdin.take().is_some() {
            warn!(path = ?self.path, "Video writer dropped unfinished, killing ffmpeg");
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}
