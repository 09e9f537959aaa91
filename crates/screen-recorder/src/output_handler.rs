//! What happens after a recording is saved (or fails to save).
//!
//! Shows a desktop notification, optionally copies the saved path to the
//! clipboard and optionally opens the destination folder.

use crate::{AppError, AppResult, config::OutputConfig};

use std::{panic::Location, path::Path, time::Duration};

use arboard::Clipboard;
use error_location::ErrorLocation;
use notify_rust::{Notification, Timeout};
use screen_recorder_core::{SavedRecording, format_hms};
use tracing::{debug, info, instrument, warn};

const APP_NAME: &str = "Screen Recorder";

/// How long notifications stay on screen.
const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(6);

/// Notification, clipboard and folder handling for finished recordings.
pub struct OutputHandler {
    pub(crate) clipboard: Option<Clipboard>,
}

impl OutputHandler {
    /// Create a new output handler.
    ///
    /// A missing clipboard is not fatal; copying is then skipped.
    #[instrument]
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                warn!(error = %e, "Clipboard unavailable, path copying disabled");
                None
            }
        };

        info!("OutputHandler initialized");

        Self { clipboard }
    }

    /// Tell the user where the recording went.
    ///
    /// Each step is best effort; failures are logged and the remaining
    /// steps still run.
    #[instrument(skip(self, saved, options), fields(path = ?saved.path))]
    pub fn recording_saved(&mut self, saved: &SavedRecording, options: &OutputConfig) {
        let body = saved_summary(saved);
        if let Err(e) = notify(saved_title(saved), &body) {
            warn!(error = ?e, "Failed to show notification");
        }

        if options.copy_path_to_clipboard {
            if let Err(e) = self.copy_path(&saved.path) {
                warn!(error = ?e, "Failed to copy path to clipboard");
            }
        }

        if options.open_folder {
            if let Some(dir) = saved.path.parent() {
                if let Err(e) = open_folder(dir) {
                    warn!(error = ?e, "Failed to open recordings folder");
                }
            }
        }
    }

    /// Tell the user saving failed.
    #[instrument(skip(self, error))]
    pub fn recording_failed(&self, error: &AppError) {
        if let Err(e) = notify("Recording failed", &error.user_message()) {
            warn!(error = ?e, "Failed to show notification");
        }
    }

    #[track_caller]
    fn copy_path(&mut self, path: &Path) -> AppResult<()> {
        let Some(clipboard) = self.clipboard.as_mut() else {
            return Err(AppError::ClipboardError {
                reason: "Clipboard unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        clipboard
            .set_text(path.display().to_string())
            .map_err(|e| AppError::ClipboardError {
                reason: format!("Failed to set clipboard: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(?path, "Saved path copied to clipboard");
        Ok(())
    }
}

/// Open `dir` in the platform file manager.
#[track_caller]
pub fn open_folder(dir: &Path) -> AppResult<()> {
    std::fs::create_dir_all(dir)?;
    open::that_detached(dir)?;
    info!(?dir, "Opened folder");
    Ok(())
}

/// Notification title for a saved recording.
pub(crate) fn saved_title(saved: &SavedRecording) -> &'static str {
    if saved.interrupted {
        "Recording saved (capture stopped early)"
    } else {
        "Recording saved"
    }
}

/// One-line description of a saved recording.
pub(crate) fn saved_summary(saved: &SavedRecording) -> String {
    let audio = match saved.audio_channels {
        0 => "no audio",
        1 => "mono audio",
        _ => "stereo audio",
    };
    format!(
        "{} ({}x{}, {}, {})",
        saved.path.display(),
        saved.width,
        saved.height,
        format_hms(saved.duration),
        audio
    )
}

#[track_caller]
fn notify(summary: &str, body: &str) -> AppResult<()> {
    Notification::new()
        .appname(APP_NAME)
        .summary(summary)
        .body(body)
        .timeout(Timeout::Milliseconds(NOTIFICATION_TIMEOUT.as_millis() as u32))
        .show()
        .map_err(|e| AppError::NotificationFailed {
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;
    Ok(())
}
