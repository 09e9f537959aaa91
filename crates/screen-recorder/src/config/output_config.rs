use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where and how finished recordings are delivered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination directory (None = the user's Videos directory).
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// strftime template for file names (None = timestamped default).
    #[serde(default)]
    pub file_name_template: Option<String>,

    /// Copy the saved file's path to the clipboard.
    #[serde(default)]
    pub copy_path_to_clipboard: bool,

    /// Open the destination folder after saving.
    #[serde(default)]
    pub open_folder: bool,
}
