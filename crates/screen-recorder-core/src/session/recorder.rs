use crate::{
    CoreResult, RecorderError,
    audio::spawn_audio_capture,
    ffmpeg::Ffmpeg,
    finalize::{Finalizer, IntermediatePaths, SavedRecording, TempGuard},
    region::Region,
    session::{PreviewSlot, SessionControl, SessionOptions, SessionPhase},
    video::{ScreenSource, XcapScreen, spawn_video_capture},
};

use std::{fs, panic::Location, sync::Arc, time::Duration};

use error_location::ErrorLocation;
use tracing::{info, instrument, warn};
use uuid::Uuid;

struct ActiveSession {
    control: Arc<SessionControl>,
    finalizer: Finalizer,
}

/// Owns at most one recording session and drives its lifecycle.
pub struct Recorder {
    ffmpeg: Ffmpeg,
    preview: Arc<PreviewSlot>,
    phase: SessionPhase,
    active: Option<ActiveSession>,
}

impl Recorder {
    /// Recorder encoding through `ffmpeg`, publishing frames to `preview`.
    pub fn new(ffmpeg: Ffmpeg, preview: Arc<PreviewSlot>) -> Self {
        Self {
            ffmpeg,
            preview,
            phase: SessionPhase::Idle,
            active: None,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Preview mailbox shared with every session.
    pub fn preview(&self) -> &Arc<PreviewSlot> {
        &self.preview
    }

    /// Id of the running session.
    pub fn session_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|a| a.control.session_id())
    }

    /// Rectangle being recorded.
    pub fn region(&self) -> Option<Region> {
        self.active.as_ref().map(|a| a.finalizer.video.region)
    }

    /// Recorded time so far, pauses excluded. Zero when idle.
    pub fn elapsed(&self) -> Duration {
        self.active
            .as_ref()
            .map(|a| a.control.elapsed())
            .unwrap_or_default()
    }

    /// Whether the capture loop of the running session has exited without a
    /// stop request, e.g. after the screen or encoder failed for good.
    ///
    /// The session still has to be stopped to save what was recorded.
    pub fn capture_ended(&self) -> bool {
        self.active
            .as_ref()
            .is_some_and(|a| a.finalizer.video.handle.is_finished())
    }

    /// Open the region overlay.
    #[track_caller]
    pub fn begin_selection(&mut self) -> CoreResult<()> {
        self.phase = self.phase.transition(SessionPhase::SelectingRegion)?;
        Ok(())
    }

    /// Close the region overlay without recording.
    #[track_caller]
    pub fn cancel_selection(&mut self) -> CoreResult<()> {
        self.phase = self.phase.transition(SessionPhase::Idle)?;
        Ok(())
    }

    /// Start recording the primary monitor.
    pub fn start(&mut self, options: SessionOptions) -> CoreResult<()> {
        self.start_with(options, XcapScreen::primary)
    }

    /// Start recording frames from the screen produced by `open_screen`.
    #[instrument(skip(self, options, open_screen), fields(area = ?options.area, audio = ?options.audio, fps = options.fps))]
    pub fn start_with<S, OpenScreen>(
        &mut self,
        options: SessionOptions,
        open_screen: OpenScreen,
    ) -> CoreResult<()>
    where
        S: ScreenSource,
        OpenScreen: FnOnce() -> CoreResult<S> + Send + 'static,
    {
        if self.active.is_some() || !self.phase.can_transition_to(SessionPhase::Recording) {
            return Err(RecorderError::AlreadyRecording {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let fps = options.fps.max(1);
        let paths = IntermediatePaths::in_dir(&options.intermediate_dir);
        fs::create_dir_all(&paths.dir)?;
        let intermediates = TempGuard::new(paths.intermediates());

        let control = Arc::new(SessionControl::new(Arc::clone(&self.preview)));

        let ffmpeg = self.ffmpeg.clone();
        let video_path = paths.video.clone();
        let video = spawn_video_capture(
            open_screen,
            move |region: &Region| {
                ffmpeg.spawn_raw_writer(&video_path, region.width, region.height, fps)
            },
            options.area,
            fps,
            Arc::clone(&control),
        )?;

        let audio = if options.audio.is_empty() {
            None
        } else {
            match spawn_audio_capture(
                options.audio,
                options.devices.clone(),
                paths.dir.clone(),
                Arc::clone(&control),
            ) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    control.cancel();
                    if video.handle.join().is_err() {
                        warn!("Video capture panicked while aborting start");
                    }
                    return Err(e);
                }
            }
        };

        info!(
            session_id = %control.session_id(),
            region = ?video.region,
            "Recording started"
        );

        let finalizer = Finalizer {
            control: Arc::clone(&control),
            video,
            audio,
            selection: options.audio,
            paths,
            intermediates,
            ffmpeg: self.ffmpeg.clone(),
            encoder: options.encoder,
            output: options.output,
        };
        self.active = Some(ActiveSession { control, finalizer });
        self.phase = SessionPhase::Recording;
        Ok(())
    }

    /// Suspend capture. Pausing a paused session is a no-op.
    #[track_caller]
    pub fn pause(&mut self) -> CoreResult<()> {
        let active = self.require_active()?;
        if self.phase == SessionPhase::Paused {
            return Ok(());
        }
        active.control.pause();
        self.phase = self.phase.transition(SessionPhase::Paused)?;
        info!("Recording paused");
        Ok(())
    }

    /// Resume capture. Resuming a running session is a no-op.
    #[track_caller]
    pub fn resume(&mut self) -> CoreResult<()> {
        let active = self.require_active()?;
        if self.phase == SessionPhase::Recording {
            return Ok(());
        }
        active.control.resume();
        self.phase = self.phase.transition(SessionPhase::Recording)?;
        info!("Recording resumed");
        Ok(())
    }

    /// Detach the running session for finalization.
    ///
    /// The phase stays [`SessionPhase::Stopping`] until
    /// [`finish_stop`](Self::finish_stop) is called.
    #[track_caller]
    pub fn begin_stop(&mut self) -> CoreResult<Finalizer> {
        self.require_active()?;
        let next = self.phase.transition(SessionPhase::Stopping)?;
        let Some(active) = self.active.take() else {
            return Err(RecorderError::NotRecording {
                location: ErrorLocation::from(Location::caller()),
            });
        };
        // Workers stop immediately even if the finalizer runs later.
        active.control.cancel();
        self.phase = next;
        Ok(active.finalizer)
    }

    /// Return to idle after the finalizer has run.
    pub fn finish_stop(&mut self) {
        if self.phase == SessionPhase::Stopping {
            self.phase = SessionPhase::Idle;
        }
    }

    /// Stop and finalize on the calling thread.
    #[track_caller]
    pub fn stop(&mut self) -> CoreResult<SavedRecording> {
        let finalizer = self.begin_stop()?;
        let saved = finalizer.run();
        self.finish_stop();
        saved
    }

    #[track_caller]
    fn require_active(&self) -> CoreResult<&ActiveSession> {
        match (&self.active, self.phase.is_active()) {
            (Some(active), true) => Ok(active),
            _ => Err(RecorderError::NotRecording {
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            warn!("Recorder dropped mid-session, discarding recording");
            active.control.cancel();
        }
    }
}
