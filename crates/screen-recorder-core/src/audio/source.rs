use std::fmt;

/// A kind of audio input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioSource {
    /// Physical microphone input.
    Microphone,
    /// Loopback of what the system is playing.
    System,
}

impl AudioSource {
    /// Short name used in file names and logs.
    pub fn tag(self) -> &'static str {
        match self {
            AudioSource::Microphone => "mic",
            AudioSource::System => "system",
        }
    }
}

impl fmt::Display for AudioSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Which audio sources a session records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AudioSelection {
    /// Record the microphone.
    pub microphone: bool,
    /// Record system loopback audio.
    pub system: bool,
}

impl AudioSelection {
    /// Record no audio.
    pub const NONE: Self = Self {
        microphone: false,
        system: false,
    };

    /// Whether no source is requested.
    pub fn is_empty(&self) -> bool {
        !self.microphone && !self.system
    }

    /// Requested sources in a stable order.
    pub fn sources(&self) -> Vec<AudioSource> {
        let mut sources = Vec::with_capacity(2);
        if self.microphone {
            sources.push(AudioSource::Microphone);
        }
        if self.system {
            sources.push(AudioSource::System);
        }
        sources
    }

    /// Channel count of the intermediate audio track.
    ///
    /// Microphone alone is mono. Any selection including system audio is
    /// stereo; the microphone is mixed into both channels.
    pub fn output_channels(&self) -> u16 {
        match (self.microphone, self.system) {
            (false, false) => 0,
            (true, false) => 1,
            (_, true) => 2,
        }
    }
}

/// Preferred device names per source; `None` picks automatically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioDevices {
    /// Microphone device name (default input when unset).
    pub microphone: Option<String>,
    /// Loopback device name (first loopback-looking input when unset).
    pub system: Option<String>,
}
