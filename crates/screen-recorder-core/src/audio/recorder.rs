use crate::{
    CoreResult, RecorderError,
    audio::{
        AudioDevices, AudioSelection, AudioSource, SourceRecording,
        capture::{AUDIO_QUEUE_DEPTH, SourceCapturer},
        device::find_input_device,
        spool::spawn_spool_writer,
    },
    session::SessionControl,
};

use std::{
    fs,
    panic::Location,
    path::{Path, PathBuf},
    sync::Arc,
    thread::{self, JoinHandle},
};

use error_location::ErrorLocation;
use tracing::{info, instrument, warn};

/// Everything the audio loop recorded, one entry per source that opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioCapture {
    /// Per-source spool files.
    pub recordings: Vec<SourceRecording>,
}

impl AudioCapture {
    /// Recording for `source`, if it was captured.
    pub fn recording(&self, source: AudioSource) -> Option<&SourceRecording> {
        self.recordings.iter().find(|r| r.source == source)
    }
}

/// Location of the raw spool file for `source` inside `dir`.
pub(crate) fn spool_path(dir: &Path, source: AudioSource) -> PathBuf {
    dir.join(format!("output_temp_{}.raw.wav", source.tag()))
}

struct OpenSource {
    source: AudioSource,
    capturer: SourceCapturer,
    writer: JoinHandle<CoreResult<u64>>,
    path: PathBuf,
}

/// Spawn the audio capture loop for `selection`.
///
/// Sources whose device cannot be found or opened are skipped with a
/// warning. Chunks arriving while the session is paused are discarded. The
/// loop blocks until the session is cancelled and then closes every stream.
pub(crate) fn spawn_audio_capture(
    selection: AudioSelection,
    devices: AudioDevices,
    spool_dir: PathBuf,
    control: Arc<SessionControl>,
) -> CoreResult<JoinHandle<CoreResult<AudioCapture>>> {
    let handle = thread::Builder::new()
        .name("audio-capture".to_string())
        .spawn(move || run_audio_capture(selection, &devices, &spool_dir, &control))?;
    Ok(handle)
}

#[instrument(skip(devices, control), fields(session_id = %control.session_id()))]
fn run_audio_capture(
    selection: AudioSelection,
    devices: &AudioDevices,
    spool_dir: &Path,
    control: &Arc<SessionControl>,
) -> CoreResult<AudioCapture> {
    // Streams are created and dropped on this thread; cpal streams are not
    // Send on every backend.
    let host = cpal::default_host();
    let mut open = Vec::new();

    for source in selection.sources() {
        let preferred = match source {
            AudioSource::Microphone => devices.microphone.as_deref(),
            AudioSource::System => devices.system.as_deref(),
        };

        let Some(device) = find_input_device(&host, source, preferred) else {
            warn!(source = %source, "No input device for source, recording without it");
            continue;
        };

        match open_source(source, device, spool_dir, control) {
            Ok(opened) => open.push(opened),
            Err(e) => warn!(source = %source, error = ?e, "Failed to open audio source, skipping"),
        }
    }

    if open.is_empty() {
        warn!("No audio source could be opened");
    }

    control.token().wait();

    let mut capture = AudioCapture::default();
    for OpenSource {
        source,
        mut capturer,
        writer,
        path,
    } in open
    {
        let dropped_chunks = capturer.stop();

        let written = writer.join().map_err(|_| RecorderError::WorkerPanicked {
            worker: "audio-spool",
            location: ErrorLocation::from(Location::caller()),
        })?;

        match written {
            Ok(samples) => {
                if dropped_chunks > 0 {
                    warn!(source = %source, dropped_chunks, "Audio chunks dropped during capture");
                }
                capture.recordings.push(SourceRecording {
                    source,
                    path,
                    sample_rate: capturer.sample_rate(),
                    channels: capturer.channels(),
                    samples,
                    dropped_chunks,
                });
            }
            Err(e) => {
                warn!(path = ?path, error = ?e, "Audio spool failed, dropping source");
                let _ = fs::remove_file(&path);
            }
        }
    }

    info!(sources = capture.recordings.len(), "Audio capture finished");

    Ok(capture)
}

fn open_source(
    source: AudioSource,
    device: cpal::Device,
    spool_dir: &Path,
    control: &Arc<SessionControl>,
) -> CoreResult<OpenSource> {
    let mut capturer = SourceCapturer::new(source, device)?;
    let path = spool_path(spool_dir, source);

    let (chunk_tx, chunk_rx) = crossbeam_channel::bounded(AUDIO_QUEUE_DEPTH);
    let writer = spawn_spool_writer(
        source,
        &path,
        capturer.sample_rate(),
        capturer.channels(),
        chunk_rx,
    )?;

    if let Err(e) = capturer.start(chunk_tx, Arc::clone(control)) {
        // The sender went down with the failed stream, so the writer exits.
        let _ = writer.join();
        let _ = fs::remove_file(&path);
        return Err(e);
    }

    Ok(OpenSource {
        source,
        capturer,
        writer,
        path,
    })
}
