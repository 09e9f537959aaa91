use crate::AppResult;

use screen_recorder_core::{Region, SavedRecording, SessionPhase};

/// Commands sent from the tray, hotkeys and windows to the main application.
#[derive(Debug)]
pub enum AppCommand {
    /// Record the full primary screen.
    RecordFullScreen,
    /// Open the region overlay.
    SelectRegion,
    /// The overlay finished with a selected rectangle.
    RegionSelected {
        /// Selected rectangle in screen coordinates.
        region: Region,
    },
    /// The overlay was dismissed without a selection.
    SelectionCancelled,
    /// Start when idle, stop when recording.
    ToggleRecording,
    /// Suspend capture.
    Pause,
    /// Resume capture.
    Resume,
    /// Pause when recording, resume when paused.
    TogglePause,
    /// Stop and save the current recording.
    Stop,
    /// The finalizer task completed.
    Finalized {
        /// Saved file, or why saving failed.
        result: AppResult<SavedRecording>,
    },
    /// Flip the microphone source.
    ToggleMicrophone,
    /// Flip the system audio source.
    ToggleSystemAudio,
    /// Open the destination directory.
    OpenRecordingsFolder,
    /// Request application shutdown.
    Shutdown,
}

impl AppCommand {
    /// Whether this command has nothing to act on in `phase`.
    ///
    /// Tray items and hotkeys can fire in any phase; these are dropped
    /// quietly instead of being reported as errors.
    pub(crate) fn is_ignored_in(&self, phase: SessionPhase) -> bool {
        match self {
            AppCommand::RegionSelected { .. } | AppCommand::SelectionCancelled => {
                phase != SessionPhase::SelectingRegion
            }
            AppCommand::ToggleRecording => {
                matches!(phase, SessionPhase::SelectingRegion | SessionPhase::Stopping)
            }
            AppCommand::Pause | AppCommand::Resume | AppCommand::TogglePause | AppCommand::Stop => {
                !phase.is_active()
            }
            _ => false,
        }
    }
}
