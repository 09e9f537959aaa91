/// Tray icon states corresponding to the recording lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Ready to start recording.
    Idle,
    /// Capturing screen and audio.
    Recording,
    /// Session open, capture suspended.
    Paused,
    /// Muxing and saving the recording.
    Processing,
}

impl TrayIconState {
    /// Tooltip shown for this state.
    pub fn tooltip(self) -> &'static str {
        match self {
            TrayIconState::Idle => "Screen Recorder - Ready",
            TrayIconState::Recording => "Screen Recorder - Recording...",
            TrayIconState::Paused => "Screen Recorder - Paused",
            TrayIconState::Processing => "Screen Recorder - Saving...",
        }
    }

    /// Fill colour of the generated icon, RGBA.
    pub fn color(self) -> [u8; 4] {
        match self {
            TrayIconState::Idle => [128, 128, 128, 255],
            TrayIconState::Recording => [220, 40, 40, 255],
            TrayIconState::Paused => [235, 170, 30, 255],
            TrayIconState::Processing => [50, 120, 220, 255],
        }
    }
}
