use crate::audio::{AudioSource, spool_path};

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

/// Intermediate video file name.
pub const VIDEO_TEMP_NAME: &str = "output_temp.avi";
/// Intermediate mixed audio file name.
pub const AUDIO_TEMP_NAME: &str = "output_temp.wav";
/// Mux output, moved to the destination afterwards.
pub const MUX_OUTPUT_NAME: &str = "output.mp4";

/// Every file a session writes before the final move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntermediatePaths {
    /// Directory holding the intermediates.
    pub dir: PathBuf,
    /// Encoded capture loop output.
    pub video: PathBuf,
    /// Mixed audio.
    pub audio: PathBuf,
    /// Muxed file before it is moved.
    pub mux_output: PathBuf,
}

impl IntermediatePaths {
    /// Fixed intermediate names inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            video: dir.join(VIDEO_TEMP_NAME),
            audio: dir.join(AUDIO_TEMP_NAME),
            mux_output: dir.join(MUX_OUTPUT_NAME),
            dir,
        }
    }

    /// Raw per-source spool.
    pub fn spool(&self, source: AudioSource) -> PathBuf {
        spool_path(&self.dir, source)
    }

    /// Files deleted once the mux has run.
    pub fn intermediates(&self) -> Vec<PathBuf> {
        vec![
            self.video.clone(),
            self.audio.clone(),
            self.spool(AudioSource::Microphone),
            self.spool(AudioSource::System),
        ]
    }
}

/// Deletes its files when dropped, unless they are gone already.
#[derive(Debug, Default)]
pub(crate) struct TempGuard {
    paths: Vec<PathBuf>,
}

impl TempGuard {
    pub(crate) fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    /// Stop tracking the files; they survive the guard.
    pub(crate) fn keep(&mut self) {
        self.paths.clear();
    }

    /// Delete everything now.
    pub(crate) fn remove_all(&mut self) {
        for path in self.paths.drain(..) {
            remove_if_exists(&path);
        }
    }
}

impl Drop for TempGuard {
    fn drop(&mut self) {
        self.remove_all();
    }
}

fn remove_if_exists(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(?path, "Removed intermediate file"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(?path, error = %e, "Failed to remove intermediate file"),
    }
}
