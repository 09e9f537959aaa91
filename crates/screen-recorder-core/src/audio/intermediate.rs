use crate::{
    CoreResult,
    audio::{
        AudioCapture, AudioSelection, Resampler,
        mixer::{OUTPUT_SAMPLE_RATE, mix_tracks, remix, to_i16},
    },
};

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::{debug, info, instrument, warn};

/// The mixed intermediate audio file handed to the muxer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioTrack {
    /// 16-bit PCM WAV.
    pub path: PathBuf,
    /// 1 for microphone only, 2 whenever system audio was requested.
    pub channels: u16,
    /// Always 44.1 kHz.
    pub sample_rate: u32,
    /// Frames (samples per channel) written.
    pub frames: u64,
}

/// Mix the spooled sources into a single 44.1 kHz 16-bit WAV at `path`.
///
/// Returns `None` when no audio was requested or no source recorded
/// anything, in which case no file is written.
#[instrument(skip(capture))]
pub(crate) fn write_intermediate_audio(
    capture: &AudioCapture,
    selection: AudioSelection,
    path: &Path,
) -> CoreResult<Option<AudioTrack>> {
    let channels = selection.output_channels();
    if channels == 0 {
        return Ok(None);
    }

    let mut tracks = Vec::with_capacity(capture.recordings.len());
    let recorded = selection
        .sources()
        .into_iter()
        .filter_map(|source| capture.recording(source))
        .filter(|r| !r.is_empty());
    for recording in recorded {
        let raw = read_spool(&recording.path)?;
        let remixed = remix(&raw, recording.channels, channels);

        let track = if recording.sample_rate == OUTPUT_SAMPLE_RATE {
            remixed
        } else {
            Resampler::new(recording.sample_rate, OUTPUT_SAMPLE_RATE, channels)?
                .resample(&remixed)?
        };

        debug!(
            source = %recording.source,
            input_rate = recording.sample_rate,
            input_channels = recording.channels,
            frames = track.len() / usize::from(channels),
            "Source prepared for mixing"
        );
        tracks.push(track);
    }

    let mixed = mix_tracks(&tracks);
    if mixed.is_empty() {
        warn!("Audio was requested but nothing was captured; output will have no audio track");
        return Ok(None);
    }

    let spec = WavSpec {
        channels,
        sample_rate: OUTPUT_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    for sample in &mixed {
        writer.write_sample(to_i16(*sample))?;
    }
    writer.finalize()?;

    let frames = (mixed.len() / usize::from(channels)) as u64;
    info!(path = ?path, channels, frames, sources = tracks.len(), "Intermediate audio written");

    Ok(Some(AudioTrack {
        path: path.to_path_buf(),
        channels,
        sample_rate: OUTPUT_SAMPLE_RATE,
        frames,
    }))
}

fn read_spool(path: &Path) -> CoreResult<Vec<f32>> {
    let reader = WavReader::open(path)?;
    let samples = reader.into_samples::<f32>().collect::<Result<Vec<_>, _>>()?;
    Ok(samples)
}
