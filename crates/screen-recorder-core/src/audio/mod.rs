pub(crate) mod capture;
pub(crate) mod device;
mod intermediate;
pub(crate) mod mixer;
mod recorder;
mod resampler;
mod source;
mod spool;

pub(crate) use {
    device::input_device_names,
    intermediate::write_intermediate_audio,
    recorder::{spawn_audio_capture, spool_path},
    resampler::Resampler,
};

pub use {
    intermediate::AudioTrack,
    recorder::AudioCapture,
    source::{AudioDevices, AudioSelection, AudioSource},
    spool::SourceRecording,
};
