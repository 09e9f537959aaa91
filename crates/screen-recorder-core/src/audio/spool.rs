use crate::{CoreResult, audio::AudioSource};

use std::{
    path::{Path, PathBuf},
    thread::{self, JoinHandle},
};

use crossbeam_channel::Receiver;
use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::{debug, info};

/// Raw per-source audio spooled to disk during capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRecording {
    /// Which input produced the audio.
    pub source: AudioSource,
    /// Float WAV at the device's native rate and channel count.
    pub path: PathBuf,
    /// Device sample rate.
    pub sample_rate: u32,
    /// Device channel count (interleaved in the file).
    pub channels: u16,
    /// Interleaved samples written.
    pub samples: u64,
    /// Callback chunks lost because the spool writer fell behind.
    pub dropped_chunks: u64,
}

impl SourceRecording {
    /// Whether anything was recorded.
    pub fn is_empty(&self) -> bool {
        self.samples == 0
    }
}

/// Spawn a thread streaming chunks from `chunks` into a float WAV at `path`.
///
/// The thread ends when every sender is dropped and returns the number
/// of samples written.
pub(crate) fn spawn_spool_writer(
    source: AudioSource,
    path: &Path,
    sample_rate: u32,
    channels: u16,
    chunks: Receiver<Vec<f32>>,
) -> CoreResult<JoinHandle<CoreResult<u64>>> {
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(path, spec)?;
    let path = path.to_path_buf();

    let handle = thread::Builder::new()
        .name(format!("audio-spool-{}", source.tag()))
        .spawn(move || {
            let mut samples = 0u64;
            for chunk in chunks {
                for sample in &chunk {
                    writer.write_sample(*sample)?;
                }
                samples += chunk.len() as u64;
            }
            writer.finalize()?;

            info!(source = %source, path = ?path, samples, "Audio spool closed");
            Ok(samples)
        })?;

    debug!(source = %source, sample_rate, channels, "Audio spool writer started");

    Ok(handle)
}
