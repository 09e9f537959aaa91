use crate::TrayIconState;

use screen_recorder_core::{AudioSelection, SessionPhase};

/// Everything the tray shows, derived from the session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    /// "Record" enabled.
    pub record: bool,
    /// "Select Region" enabled.
    pub select_region: bool,
    /// "Stop" enabled.
    pub stop: bool,
    /// "Pause" enabled.
    pub pause: bool,
    /// "Resume" enabled.
    pub resume: bool,
    /// Audio toggles enabled (only between sessions).
    pub audio_toggles: bool,
    /// "Microphone Audio" checked.
    pub microphone: bool,
    /// "System Audio" checked.
    pub system: bool,
    /// Icon and tooltip.
    pub icon: TrayIconState,
}

impl MenuState {
    /// Menu for `phase` with the given audio toggles.
    pub fn for_phase(phase: SessionPhase, audio: AudioSelection) -> Self {
        let idle = phase == SessionPhase::Idle;
        let icon = match phase {
            SessionPhase::Idle | SessionPhase::SelectingRegion => TrayIconState::Idle,
            SessionPhase::Recording => TrayIconState::Recording,
            SessionPhase::Paused => TrayIconState::Paused,
            SessionPhase::Stopping => TrayIconState::Processing,
        };

        Self {
            record: idle,
            select_region: idle,
            stop: phase.is_active(),
            pause: phase == SessionPhase::Recording,
            resume: phase == SessionPhase::Paused,
            audio_toggles: idle,
            microphone: audio.microphone,
            system: audio.system,
            icon,
        }
    }
}
