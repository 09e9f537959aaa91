use crate::{
    CoreResult, RecorderError,
    audio::{AudioSource, device::device_name},
    session::SessionControl,
};

use std::{
    panic::Location,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use cpal::{
    Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig,
    traits::{DeviceTrait, StreamTrait},
};
use crossbeam_channel::Sender;
use error_location::ErrorLocation;
use tracing::{error, info, instrument};

/// Chunks buffered between the device callback and the spool writer.
///
/// Callbacks usually deliver 5-20ms of audio, so this holds several
/// seconds; the writer only falls that far behind on a stalled disk.
pub(crate) const AUDIO_QUEUE_DEPTH: usize = 512;

/// Device callback body: converts a buffer and queues it for the spool.
pub(crate) struct ChunkForwarder {
    pub(crate) chunks: Sender<Vec<f32>>,
    pub(crate) control: Arc<SessionControl>,
    /// Set before the stream is dropped so a late callback cannot enqueue.
    pub(crate) shutdown: Arc<AtomicBool>,
    pub(crate) dropped: Arc<AtomicU64>,
}

impl ChunkForwarder {
    /// Queue `data` unless capture is shut down or paused.
    pub(crate) fn forward<T>(&self, data: &[T])
    where
        T: Sample,
        f32: FromSample<T>,
    {
        if self.shutdown.load(Ordering::Acquire) || self.control.is_paused() {
            return;
        }
        let chunk: Vec<f32> = data.iter().map(|s| s.to_sample::<f32>()).collect();
        // Never block the device thread; a full queue loses this chunk.
        if self.chunks.try_send(chunk).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// One open input stream feeding a single source's chunk channel.
pub(crate) struct SourceCapturer {
    source: AudioSource,
    device: Device,
    config: StreamConfig,
    sample_format: SampleFormat,
    stream: Option<Stream>,
    shutdown: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
}

impl SourceCapturer {
    #[track_caller]
    #[instrument(skip(device))]
    pub(crate) fn new(source: AudioSource, device: Device) -> CoreResult<Self> {
        let config = device
            .default_input_config()
            .map_err(|e| RecorderError::DeviceError {
                reason: format!("Failed to get config for {}: {}", source, e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!(
            source = %source,
            device = %device_name(&device),
            sample_rate = config.sample_rate(),
            channels = config.channels(),
            sample_format = ?config.sample_format(),
            "Audio source initialized"
        );

        Ok(Self {
            source,
            device,
            sample_format: config.sample_format(),
            config: config.into(),
            stream: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            dropped: Arc::new(AtomicU64::new(0)),
        })
    }

    #[track_caller]
    #[instrument(skip(self, chunks, control), fields(source = %self.source))]
    pub(crate) fn start(
        &mut self,
        chunks: Sender<Vec<f32>>,
        control: Arc<SessionControl>,
    ) -> CoreResult<()> {
        self.shutdown.store(false, Ordering::Release);

        let forwarder = ChunkForwarder {
            chunks,
            control,
            shutdown: Arc::clone(&self.shutdown),
            dropped: Arc::clone(&self.dropped),
        };
        let stream = match self.sample_format {
            SampleFormat::F32 => self.build_stream::<f32>(forwarder)?,
            SampleFormat::I16 => self.build_stream::<i16>(forwarder)?,
            SampleFormat::U16 => self.build_stream::<u16>(forwarder)?,
            SampleFormat::I32 => self.build_stream::<i32>(forwarder)?,
            other => {
                return Err(RecorderError::DeviceError {
                    reason: format!("Unsupported sample format {:?} on {}", other, self.source),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        };

        stream.play().map_err(|e| RecorderError::DeviceError {
            reason: format!("Failed to start {} stream: {}", self.source, e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        self.stream = Some(stream);
        info!(source = %self.source, "Audio capture started");

        Ok(())
    }

    #[track_caller]
    fn build_stream<T>(&self, forwarder: ChunkForwarder) -> CoreResult<Stream>
    where
        T: SizedSample,
        f32: FromSample<T>,
    {
        let source = self.source;

        self.device
            .build_input_stream(
                &self.config,
                move |data: &[T], _: &cpal::InputCallbackInfo| forwarder.forward(data),
                move |err| {
                    error!(source = %source, "Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| RecorderError::DeviceError {
                reason: format!("Failed to build {} stream: {}", source, e),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Close the stream. Returns the number of chunks lost to a full queue.
    ///
    /// Dropping the stream drops the callback and with it the chunk sender,
    /// which ends the spool writer's receive loop.
    #[instrument(skip(self), fields(source = %self.source))]
    pub(crate) fn stop(&mut self) -> u64 {
        self.shutdown.store(true, Ordering::Release);

        if let Some(stream) = self.stream.take() {
            drop(stream);
            // Some backends return from drop before the last callback ends.
            std::thread::sleep(std::time::Duration::from_millis(5));
            info!(source = %self.source, "Audio capture stopped");
        }

        self.dropped.load(Ordering::Relaxed)
    }

    pub(crate) fn sample_rate(&self) -> u32 {
        self.config.sample_rate
    }

    pub(crate) fn channels(&self) -> u16 {
        self.config.channels
    }
}
