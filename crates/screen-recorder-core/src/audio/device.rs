use crate::audio::AudioSource;

use cpal::{
    Device, Host,
    traits::{DeviceTrait, HostTrait},
};
use tracing::{debug, warn};

/// Substrings identifying inputs that capture the system output mix.
pub(crate) const LOOPBACK_HINTS: &[&str] = &[
    "stereo mix",
    "monitor of",
    ".monitor",
    "loopback",
    "what u hear",
    "wave out mix",
    "blackhole",
];

/// Whether a device name looks like a loopback input.
pub(crate) fn is_loopback_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    LOOPBACK_HINTS.iter().any(|hint| lower.contains(hint))
}

#[allow(deprecated)]
pub(crate) fn device_name(device: &Device) -> String {
    device.name().unwrap_or_else(|_| "<unnamed>".to_string())
}

/// Find the input device for `source`.
///
/// `preferred` matches a device name case-insensitively. Without a
/// preference the microphone is the host default input and system audio
/// is the first loopback-looking input. `None` means the source is
/// unavailable and should be skipped.
pub(crate) fn find_input_device(
    host: &Host,
    source: AudioSource,
    preferred: Option<&str>,
) -> Option<Device> {
    let devices: Vec<Device> = match host.input_devices() {
        Ok(devices) => devices.collect(),
        Err(e) => {
            warn!(error = %e, "Failed to enumerate input devices");
            Vec::new()
        }
    };

    for device in &devices {
        debug!(source = %source, name = %device_name(device), "Input device available");
    }

    if let Some(wanted) = preferred {
        let wanted = wanted.to_lowercase();
        let found = devices
            .iter()
            .find(|d| device_name(d).to_lowercase() == wanted)
            .cloned();
        if found.is_some() {
            return found;
        }
        warn!(source = %source, device = %wanted, "Configured audio device not found, falling back");
    }

    match source {
        AudioSource::Microphone => host.default_input_device(),
        AudioSource::System => devices
            .into_iter()
            .find(|d| is_loopback_name(&device_name(d))),
    }
}

/// Names of every input device on the default host.
pub(crate) fn input_device_names() -> Vec<String> {
    match cpal::default_host().input_devices() {
        Ok(devices) => devices.map(|d| device_name(&d)).collect(),
        Err(e) => {
            warn!(error = %e, "Failed to enumerate input devices");
            Vec::new()
        }
    }
}
