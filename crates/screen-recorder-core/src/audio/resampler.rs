use crate::{CoreResult, RecorderError};

use std::panic::Location;

use audioadapter_buffers::direct::InterleavedSlice;
use error_location::ErrorLocation;
use rubato::{Fft, FixedSync, Resampler as RubatoResampler};
use tracing::{debug, instrument};

/// Interleaved-audio sample rate converter.
pub struct Resampler {
    resampler: Fft<f32>,
    input_rate: u32,
    output_rate: u32,
    channels: usize,
}

impl Resampler {
    #[track_caller]
    #[instrument]
    pub fn new(input_rate: u32, output_rate: u32, channels: u16) -> CoreResult<Self> {
        let chunk_frames = 1024;
        let sub_chunks = 2;
        let channels = usize::from(channels.max(1));

        let resampler = Fft::<f32>::new(
            input_rate as usize,
            output_rate as usize,
            chunk_frames,
            sub_chunks,
            channels,
            FixedSync::Input,
        )
        .map_err(|e| RecorderError::ResamplingError {
            reason: format!("Failed to create resampler: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        debug!(input_rate, output_rate, channels, chunk_frames, "Resampler initialized");

        Ok(Self {
            resampler,
            input_rate,
            output_rate,
            channels,
        })
    }

    /// Resample interleaved `samples`; a trailing partial frame is ignored.
    ///
    /// The whole clip is converted in one go: the resampler's start-up delay
    /// is trimmed from the front and the tail is flushed, so the output is
    /// aligned with the input and `input_frames * ratio` frames long.
    #[track_caller]
    #[instrument(skip(self, samples))]
    pub fn resample(&mut self, samples: &[f32]) -> CoreResult<Vec<f32>> {
        let input_frames = samples.len() / self.channels;
        if input_frames == 0 {
            return Ok(Vec::new());
        }

        let input = &samples[..input_frames * self.channels];
        let input_adapter = InterleavedSlice::new(input, self.channels, input_frames).map_err(|e| {
            RecorderError::ResamplingError {
                reason: format!("Failed to create input adapter: {}", e),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        let capacity = self.resampler.process_all_needed_output_len(input_frames);
        let mut output = vec![0.0f32; capacity * self.channels];
        let mut output_adapter = InterleavedSlice::new_mut(&mut output, self.channels, capacity)
            .map_err(|e| RecorderError::ResamplingError {
                reason: format!("Failed to create output adapter: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let (_frames_read, frames_written) = self
            .resampler
            .process_all_into_buffer(&input_adapter, &mut output_adapter, input_frames, None)
            .map_err(|e| RecorderError::ResamplingError {
                reason: format!("Resampling failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        output.truncate(frames_written * self.channels);

        debug!(
            input_frames,
            output_frames = output.len() / self.channels,
            input_rate = self.input_rate,
            output_rate = self.output_rate,
            "Resampled audio"
        );

        Ok(output)
    }
}
