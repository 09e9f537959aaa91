use serde::{Deserialize, Serialize};

/// Audio source configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Record the microphone by default.
    #[serde(default)]
    pub microphone: bool,

    /// Record system audio by default.
    #[serde(default)]
    pub system: bool,

    /// Microphone device name (None = default input).
    #[serde(default)]
    pub microphone_device: Option<String>,

    /// Loopback device name (None = first loopback-looking input).
    #[serde(default)]
    pub system_device: Option<String>,
}
