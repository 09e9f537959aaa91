use crate::{
    CoreResult, RecorderError,
    audio::{AudioCapture, AudioSelection, AudioTrack, write_intermediate_audio},
    ffmpeg::{EncoderSettings, Ffmpeg, MuxJob},
    finalize::{
        IntermediatePaths, TempGuard, default_destination_dir, move_file, output_file_name,
        unique_path,
    },
    session::SessionControl,
    video::{VideoStats, pipeline::VideoCapture},
};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
    sync::Arc,
    thread::JoinHandle,
    time::Duration,
};

use chrono::Local;
use error_location::ErrorLocation;
use tracing::{info, instrument, warn};

/// Where the finished recording goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputTarget {
    /// Destination directory; the user's Videos directory when unset.
    pub directory: Option<PathBuf>,
    /// strftime template for the file name.
    pub file_name_template: Option<String>,
}

impl OutputTarget {
    /// Configured directory or the platform default.
    pub fn resolve_dir(&self) -> PathBuf {
        self.directory.clone().unwrap_or_else(default_destination_dir)
    }
}

/// A recording that made it to its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedRecording {
    /// Final location.
    pub path: PathBuf,
    /// Recorded time, pauses excluded.
    pub duration: Duration,
    /// Frames in the video track.
    pub frames: u64,
    /// Video width.
    pub width: u32,
    /// Video height.
    pub height: u32,
    /// Audio channels in the file; 0 when there is no audio track.
    pub audio_channels: u16,
    /// Capture failed mid-session and the file ends at the failure.
    pub interrupted: bool,
}

/// The tail of a session: everything needed to turn the running workers
/// into a saved file.
///
/// Obtained from [`Recorder::begin_stop`](crate::Recorder::begin_stop) so
/// the slow part can run off the caller's thread.
pub struct Finalizer {
    pub(crate) control: Arc<SessionControl>,
    pub(crate) video: VideoCapture,
    pub(crate) audio: Option<JoinHandle<CoreResult<AudioCapture>>>,
    pub(crate) selection: AudioSelection,
    pub(crate) paths: IntermediatePaths,
    pub(crate) intermediates: TempGuard,
    pub(crate) ffmpeg: Ffmpeg,
    pub(crate) encoder: EncoderSettings,
    pub(crate) output: OutputTarget,
}

impl Finalizer {
    /// Stop the workers, mux, clean up and move the result into place.
    ///
    /// Intermediate files are removed whether or not this succeeds. If the
    /// final move fails the muxed file stays in the intermediate directory
    /// and [`RecorderError::SaveFailed`] says where.
    #[instrument(skip(self), fields(session_id = %self.control.session_id()))]
    pub fn run(self) -> CoreResult<SavedRecording> {
        let Finalizer {
            control,
            video,
            audio,
            selection,
            paths,
            mut intermediates,
            ffmpeg,
            encoder,
            output,
        } = self;

        let duration = control.elapsed();
        control.cancel();
        info!(duration_s = duration.as_secs_f64(), "Finalizing recording");

        let audio_track = audio.map(|handle| mix_audio(handle, selection, &paths));

        let stats = join_video(video)?;
        control.preview().take();
        if stats.frames == 0 {
            return Err(RecorderError::NoFramesCaptured {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let audio_track = match audio_track {
            Some(Ok(track)) => track,
            Some(Err(e)) => {
                warn!(error = ?e, "Audio could not be prepared, saving video only");
                None
            }
            None => None,
        };
        if audio_track.is_none() && !selection.is_empty() {
            warn!("Audio was requested but nothing was captured");
        }

        // A failed mux may leave a truncated file behind.
        let mut muxed = TempGuard::new(vec![paths.mux_output.clone()]);
        ffmpeg.mux(&MuxJob {
            video: paths.video.clone(),
            audio: audio_track.as_ref().map(|t| t.path.clone()),
            output: paths.mux_output.clone(),
            settings: encoder,
        })?;
        // From here on the muxed file is the only copy of the recording.
        muxed.keep();
        intermediates.remove_all();

        let destination = save_muxed(&paths.mux_output, &output)?;

        let saved = SavedRecording {
            path: destination,
            duration,
            frames: stats.frames,
            width: stats.width,
            height: stats.height,
            audio_channels: audio_track.map(|t| t.channels).unwrap_or(0),
            interrupted: stats.interrupted,
        };
        info!(
            path = ?saved.path,
            frames = saved.frames,
            width = saved.width,
            height = saved.height,
            audio_channels = saved.audio_channels,
            interrupted = saved.interrupted,
            "Recording saved"
        );
        Ok(saved)
    }
}

/// Move the muxed file into the destination directory.
///
/// On failure the file stays where the mux wrote it and the error names it.
#[track_caller]
fn save_muxed(muxed: &Path, output: &OutputTarget) -> CoreResult<PathBuf> {
    let dir = output.resolve_dir();
    let file_name = output_file_name(output.file_name_template.as_deref(), &Local::now());
    let destination = dir.join(&file_name);

    let moved = fs::create_dir_all(&dir)
        .map_err(RecorderError::from)
        .and_then(|()| {
            let destination = unique_path(&dir, &file_name);
            move_file(muxed, &destination).map(|()| destination)
        });

    moved.map_err(|e| {
        warn!(kept = ?muxed, ?destination, error = %e, "Could not move recording, leaving it in place");
        RecorderError::SaveFailed {
            kept: muxed.to_path_buf(),
            destination,
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    })
}

fn mix_audio(
    handle: JoinHandle<CoreResult<AudioCapture>>,
    selection: AudioSelection,
    paths: &IntermediatePaths,
) -> CoreResult<Option<AudioTrack>> {
    let capture = handle.join().map_err(|_| RecorderError::WorkerPanicked {
        worker: "audio-capture",
        location: ErrorLocation::from(Location::caller()),
    })??;
    write_intermediate_audio(&capture, selection, &paths.audio)
}

fn join_video(video: VideoCapture) -> CoreResult<VideoStats> {
    video.handle.join().map_err(|_| RecorderError::WorkerPanicked {
        worker: "video-capture",
        location: ErrorLocation::from(Location::caller()),
    })?
}
