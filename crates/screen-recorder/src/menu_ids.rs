use crate::AppCommand;

use tray_icon::menu::MenuId;

/// Ids of the tray menu entries that trigger commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuIds {
    /// "Record"
    pub record: MenuId,
    /// "Select Region"
    pub select_region: MenuId,
    /// "Stop"
    pub stop: MenuId,
    /// "Pause"
    pub pause: MenuId,
    /// "Resume"
    pub resume: MenuId,
    /// "Microphone Audio"
    pub microphone: MenuId,
    /// "System Audio"
    pub system: MenuId,
    /// "Open Recordings Folder"
    pub open_folder: MenuId,
    /// "Exit"
    pub exit: MenuId,
}

impl MenuIds {
    /// Command for a clicked menu entry; `None` for unknown ids.
    pub fn command_for(&self, id: &MenuId) -> Option<AppCommand> {
        let command = if *id == self.record {
            AppCommand::RecordFullScreen
        } else if *id == self.select_region {
            AppCommand::SelectRegion
        } else if *id == self.stop {
            AppCommand::Stop
        } else if *id == self.pause {
            AppCommand::Pause
        } else if *id == self.resume {
            AppCommand::Resume
        } else if *id == self.microphone {
            AppCommand::ToggleMicrophone
        } else if *id == self.system {
            AppCommand::ToggleSystemAudio
        } else if *id == self.open_folder {
            AppCommand::OpenRecordingsFolder
        } else if *id == self.exit {
            AppCommand::Shutdown
        } else {
            return None;
        };
        Some(command)
    }
}
