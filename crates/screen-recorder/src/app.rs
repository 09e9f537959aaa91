use crate::{
    AppCommand, AppError, AppResult, MenuIds, MenuState, OutputHandler, UiCommand,
    config::Config, output_handler::open_folder,
};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use screen_recorder_core::{
    AudioSelection, CaptureArea, Recorder, RecorderError, SavedRecording, SessionPhase, format_hms,
};
use tao::event_loop::EventLoopProxy;
use tokio::{
    sync::{mpsc, watch},
    task,
};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;

/// How often the elapsed-time label refreshes.
const STATUS_TICK: Duration = Duration::from_secs(1);

/// Main application state.
///
/// Runs on the async runtime thread. UI changes go back to the main
/// thread through `ui` because the tray icon and windows are `!Send`.
pub struct App {
    pub(crate) recorder: Recorder,
    pub(crate) config: Config,
    pub(crate) audio: AudioSelection,
    pub(crate) output_handler: OutputHandler,
    pub(crate) ui: EventLoopProxy<UiCommand>,
    pub(crate) command_tx: mpsc::Sender<AppCommand>,
    pub(crate) command_rx: mpsc::Receiver<AppCommand>,
    pub(crate) shutdown_tx: watch::Sender<bool>,
    pub(crate) menu_ids: MenuIds,
    pub(crate) exit_requested: bool,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!("Screen Recorder starting");

        // MenuEvent::receiver() is a blocking crossbeam receiver; one
        // blocking task forwards it until the async side goes away.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        let mut tick = tokio::time::interval(STATUS_TICK);
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        self.sync_ui();

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    match self.menu_ids.command_for(&event.id) {
                        Some(cmd) => {
                            if self.handle_command(cmd).await {
                                break;
                            }
                        }
                        None => debug!(id = ?event.id, "Ignoring unknown menu event"),
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    if self.handle_command(cmd).await {
                        break;
                    }
                }

                _ = tick.tick() => {
                    if self.recorder.capture_ended() {
                        warn!("Capture ended on its own, saving what was recorded");
                        if let Err(e) = self.stop_recording() {
                            error!(error = ?e, "Failed to stop after capture ended");
                            task::block_in_place(|| self.output_handler.recording_failed(&e));
                        }
                        self.sync_ui();
                    } else if self.recorder.phase().is_active() {
                        self.send_ui(UiCommand::SetElapsed(format_hms(self.recorder.elapsed())));
                    }
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        drop(tray_event_rx);

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        self.send_ui(UiCommand::Shutdown);
        let _ = self.shutdown_tx.send(true);
        info!("Screen Recorder shut down successfully");

        Ok(())
    }

    /// Handle one command. Returns `true` when the loop should exit.
    #[instrument(skip(self))]
    pub(crate) async fn handle_command(&mut self, cmd: AppCommand) -> bool {
        let phase = self.recorder.phase();
        if cmd.is_ignored_in(phase) {
            debug!(?phase, "Command ignored in this phase");
            return false;
        }

        let result = match cmd {
            AppCommand::RecordFullScreen => self.start_recording(CaptureArea::FullScreen),
            AppCommand::SelectRegion => self.select_region(),
            AppCommand::RegionSelected { region } => {
                if let Err(e) = self.recorder.cancel_selection() {
                    warn!(error = ?e, "Selection state out of sync");
                }
                self.start_recording(CaptureArea::Region(region))
            }
            AppCommand::SelectionCancelled => self.recorder.cancel_selection().map_err(AppError::from),
            AppCommand::ToggleRecording => {
                if phase == SessionPhase::Idle {
                    self.start_recording(CaptureArea::FullScreen)
                } else {
                    self.stop_recording()
                }
            }
            AppCommand::Pause => self.recorder.pause().map_err(AppError::from),
            AppCommand::Resume => self.recorder.resume().map_err(AppError::from),
            AppCommand::TogglePause => {
                if phase == SessionPhase::Paused {
                    self.recorder.resume().map_err(AppError::from)
                } else {
                    self.recorder.pause().map_err(AppError::from)
                }
            }
            AppCommand::Stop => self.stop_recording(),
            AppCommand::Finalized { result } => {
                self.finalized(result);
                if self.exit_requested {
                    info!("Recording saved, exiting");
                    return true;
                }
                Ok(())
            }
            AppCommand::ToggleMicrophone => {
                self.toggle_audio(|audio| audio.microphone = !audio.microphone)
            }
            AppCommand::ToggleSystemAudio => self.toggle_audio(|audio| audio.system = !audio.system),
            AppCommand::OpenRecordingsFolder => {
                let dir = self.config.output_target().resolve_dir();
                task::block_in_place(|| open_folder(&dir))
            }
            AppCommand::Shutdown => return self.shutdown(),
        };

        if let Err(e) = result {
            error!(error = ?e, "Command failed");
            task::block_in_place(|| self.output_handler.recording_failed(&e));
        }
        self.sync_ui();
        false
    }

    #[instrument(skip(self))]
    fn start_recording(&mut self, area: CaptureArea) -> AppResult<()> {
        let options = self.config.session_options(area, self.audio);
        let preview = self.config.capture.preview;

        self.recorder.preview().set_enabled(preview);
        if let Err(e) = task::block_in_place(|| self.recorder.start(options)) {
            self.recorder.preview().set_enabled(false);
            return Err(e.into());
        }

        self.send_ui(UiCommand::SetElapsed(format_hms(Duration::ZERO)));
        if preview {
            self.send_ui(UiCommand::ShowPreview);
        }

        info!(
            session_id = ?self.recorder.session_id(),
            region = ?self.recorder.region(),
            "Recording started"
        );
        Ok(())
    }

    fn select_region(&mut self) -> AppResult<()> {
        self.recorder.begin_selection()?;
        self.send_ui(UiCommand::OpenOverlay);
        Ok(())
    }

    /// Stop capture now; encode and move on a blocking task.
    #[instrument(skip(self))]
    fn stop_recording(&mut self) -> AppResult<()> {
        let finalizer = self.recorder.begin_stop()?;
        self.recorder.preview().set_enabled(false);
        self.send_ui(UiCommand::HidePreview);

        let command_tx = self.command_tx.clone();
        task::spawn(async move {
            let result = match task::spawn_blocking(move || finalizer.run()).await {
                Ok(result) => result.map_err(AppError::from),
                Err(e) => {
                    error!(error = ?e, "Finalizer task panicked");
                    Err(AppError::from(RecorderError::WorkerPanicked {
                        worker: "finalizer",
                        location: ErrorLocation::from(Location::caller()),
                    }))
                }
            };

            if let Err(e) = command_tx.send(AppCommand::Finalized { result }).await {
                error!(error = ?e, "Failed to report finalized recording");
            }
        });

        info!("Recording stopping");
        Ok(())
    }

    fn finalized(&mut self, result: AppResult<SavedRecording>) {
        self.recorder.finish_stop();
        self.send_ui(UiCommand::SetElapsed(format_hms(Duration::ZERO)));

        match result {
            Ok(saved) => {
                info!(path = ?saved.path, duration = ?saved.duration, "Recording saved");
                let output = &self.config.output;
                task::block_in_place(|| self.output_handler.recording_saved(&saved, output));
            }
            Err(e) => {
                error!(error = ?e, "Recording could not be saved");
                task::block_in_place(|| self.output_handler.recording_failed(&e));
            }
        }
    }

    /// Flip an audio source and persist it as the new default.
    fn toggle_audio(&mut self, flip: impl FnOnce(&mut AudioSelection)) -> AppResult<()> {
        if self.recorder.phase() != SessionPhase::Idle {
            debug!("Audio sources are fixed while a session is running");
            return Ok(());
        }

        flip(&mut self.audio);
        self.config.audio.microphone = self.audio.microphone;
        self.config.audio.system = self.audio.system;
        info!(microphone = self.audio.microphone, system = self.audio.system, "Audio sources changed");

        task::block_in_place(|| self.config.save())
    }

    /// Returns `true` when the loop can exit now.
    fn shutdown(&mut self) -> bool {
        info!(phase = ?self.recorder.phase(), "Shutdown requested");
        self.exit_requested = true;

        match self.recorder.phase() {
            SessionPhase::Recording | SessionPhase::Paused => {
                if let Err(e) = self.stop_recording() {
                    error!(error = ?e, "Failed to stop recording on exit");
                    return true;
                }
                self.sync_ui();
                false
            }
            SessionPhase::Stopping => false,
            SessionPhase::SelectingRegion => {
                self.send_ui(UiCommand::CloseOverlay);
                let _ = self.recorder.cancel_selection();
                true
            }
            SessionPhase::Idle => true,
        }
    }

    fn sync_ui(&self) {
        self.send_ui(UiCommand::SetMenu(MenuState::for_phase(
            self.recorder.phase(),
            self.audio,
        )));
    }

    fn send_ui(&self, cmd: UiCommand) {
        if let Err(e) = self.ui.send_event(cmd) {
            debug!(error = ?e, "UI event loop gone");
        }
    }
}
