use crate::MenuState;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns the tray icon and every window (`TrayIcon` and
/// tao windows are `!Send`), so all UI mutations flow through this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Apply menu enablement, check marks and icon.
    SetMenu(MenuState),
    /// Update the elapsed-time label.
    SetElapsed(String),
    /// Show the region selection overlay.
    OpenOverlay,
    /// Close the region selection overlay.
    CloseOverlay,
    /// Open the live preview window.
    ShowPreview,
    /// Close the live preview window.
    HidePreview,
    /// A new preview frame is waiting in the preview slot.
    PreviewFrameReady,
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
