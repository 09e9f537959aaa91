use crate::{
    CoreResult, RecorderError,
    region::{CaptureArea, Region},
    session::SessionControl,
    video::{FrameSink, ScreenSource, VideoFrame},
};

use std::{
    panic::Location,
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crossbeam_channel::{Receiver, select};
use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

/// Frames buffered between capture and encoder.
///
/// The capture thread blocks once this many frames are waiting, so memory
/// stays bounded when encoding is slower than capture.
pub(crate) const FRAME_QUEUE_DEPTH: usize = 8;

/// Grab failures in a row after which the capture loop gives up.
pub(crate) const MAX_CONSECUTIVE_GRAB_FAILURES: u32 = 30;

/// Outcome of a finished video capture loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoStats {
    /// Frames accepted by the encoder.
    pub frames: u64,
    /// Output width.
    pub width: u32,
    /// Output height.
    pub height: u32,
    /// Ticks where no frame was produced because grabbing failed.
    pub failed_grabs: u64,
    /// Wall time the loop ran, pauses included.
    pub wall_time: Duration,
    /// Capture gave up before the session was stopped; `frames` holds what
    /// was recorded up to then.
    pub interrupted: bool,
}

/// A running capture loop and the rectangle it records.
pub(crate) struct VideoCapture {
    pub(crate) region: Region,
    pub(crate) handle: JoinHandle<CoreResult<VideoStats>>,
}

enum Delivery {
    Sent,
    EncoderGone,
    Cancelled,
}

/// Spawn the video capture loop.
///
/// The screen and sink are opened on the capture thread; this call waits
/// until they are ready so setup errors surface to the caller.
pub(crate) fn spawn_video_capture<S, K, OpenScreen, OpenSink>(
    open_screen: OpenScreen,
    open_sink: OpenSink,
    area: CaptureArea,
    fps: u32,
    control: Arc<SessionControl>,
) -> CoreResult<VideoCapture>
where
    S: ScreenSource,
    K: FrameSink + Send + 'static,
    OpenScreen: FnOnce() -> CoreResult<S> + Send + 'static,
    OpenSink: FnOnce(&Region) -> CoreResult<K> + Send + 'static,
{
    let (ready_tx, ready_rx) = crossbeam_channel::bounded(1);

    let handle = thread::Builder::new()
        .name("video-capture".to_string())
        .spawn(move || match open_pipeline(open_screen, open_sink, area) {
            Ok((screen, region, sink)) => {
                let _ = ready_tx.send(Ok(region));
                let result = run_capture_loop(screen, sink, region, fps, &control);
                if !control.is_cancelled() {
                    // Exited on its own; stop the rest of the session too.
                    warn!("Video capture ended before stop was requested");
                    control.cancel();
                }
                result
            }
            Err(e) => {
                let _ = ready_tx.send(Err(e));
                Ok(VideoStats::default())
            }
        })?;

    let region = ready_rx
        .recv()
        .map_err(|_| RecorderError::WorkerPanicked {
            worker: "video-capture",
            location: ErrorLocation::from(Location::caller()),
        })??;

    Ok(VideoCapture { region, handle })
}

fn open_pipeline<S, K, OpenScreen, OpenSink>(
    open_screen: OpenScreen,
    open_sink: OpenSink,
    area: CaptureArea,
) -> CoreResult<(S, Region, K)>
where
    OpenScreen: FnOnce() -> CoreResult<S>,
    OpenSink: FnOnce(&Region) -> CoreResult<K>,
    S: ScreenSource,
{
    let screen = open_screen()?;
    let region = area.resolve(&screen.bounds())?;
    let sink = open_sink(&region)?;
    Ok((screen, region, sink))
}

/// Interval between capture ticks for the declared frame rate.
pub(crate) fn frame_interval(fps: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(fps.max(1)))
}

#[instrument(skip(screen, sink, control), fields(session_id = %control.session_id()))]
fn run_capture_loop<S, K>(
    mut screen: S,
    sink: K,
    region: Region,
    fps: u32,
    control: &SessionControl,
) -> CoreResult<VideoStats>
where
    S: ScreenSource,
    K: FrameSink + Send + 'static,
{
    let (frame_tx, frame_rx) = crossbeam_channel::bounded::<VideoFrame>(FRAME_QUEUE_DEPTH);
    let encoder = thread::Builder::new()
        .name("video-encoder".to_string())
        .spawn(move || encode_frames(sink, frame_rx))?;

    let cancel = control.token();
    // Fixed-rate ticks; a slow iteration coalesces missed ticks.
    let ticker = crossbeam_channel::tick(frame_interval(fps));
    let started = Instant::now();
    let mut stats = VideoStats {
        width: region.width,
        height: region.height,
        ..VideoStats::default()
    };
    let mut captured = 0u64;
    let mut consecutive_failures = 0u32;

    info!(?region, fps, "Video capture started");

    let capture_result: CoreResult<()> = loop {
        let cancelled = select! {
            recv(cancel.receiver()) -> _ => true,
            recv(ticker) -> _ => false,
        };
        if cancelled {
            break Ok(());
        }
        if control.is_paused() {
            continue;
        }

        let image = match screen.grab(&region) {
            Ok(image) => {
                consecutive_failures = 0;
                image
            }
            Err(e) => {
                consecutive_failures += 1;
                stats.failed_grabs += 1;
                warn!(error = ?e, consecutive_failures, "Frame grab failed");
                if consecutive_failures >= MAX_CONSECUTIVE_GRAB_FAILURES {
                    break Err(e);
                }
                continue;
            }
        };

        let frame = VideoFrame::from_rgba(&image);
        if frame.width != region.width || frame.height != region.height {
            stats.failed_grabs += 1;
            warn!(
                width = frame.width,
                height = frame.height,
                "Grabbed frame has wrong size, skipping"
            );
            continue;
        }
        control.preview().publish(image);

        let delivery = select! {
            send(frame_tx, frame) -> sent => match sent {
                Ok(()) => Delivery::Sent,
                Err(_) => Delivery::EncoderGone,
            },
            recv(cancel.receiver()) -> _ => Delivery::Cancelled,
        };

        match delivery {
            Delivery::Sent => {
                captured += 1;
                if captured % (u64::from(fps.max(1)) * 10) == 0 {
                    debug!(
                        frames = captured,
                        elapsed_s = started.elapsed().as_secs_f32(),
                        "Capture progress"
                    );
                }
            }
            Delivery::Cancelled => break Ok(()),
            Delivery::EncoderGone => {
                break Err(RecorderError::EncoderError {
                    reason: "Encoder stopped accepting frames".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                });
            }
        }
    };

    // Closing the queue lets the encoder drain and finish.
    drop(frame_tx);
    let encoded = encoder.join().map_err(|_| RecorderError::WorkerPanicked {
        worker: "video-encoder",
        location: ErrorLocation::from(Location::caller()),
    })?;

    // The encoder's error is the root cause when both failed.
    stats.frames = encoded?;
    stats.wall_time = started.elapsed();
    if let Err(e) = capture_result {
        if stats.frames == 0 {
            return Err(e);
        }
        error!(error = ?e, frames = stats.frames, "Capture stopped early, keeping recorded frames");
        stats.interrupted = true;
    }

    let actual_fps = if stats.wall_time.as_secs_f64() > 0.0 {
        stats.frames as f64 / stats.wall_time.as_secs_f64()
    } else {
        0.0
    };
    info!(
        frames = stats.frames,
        failed_grabs = stats.failed_grabs,
        wall_time_s = stats.wall_time.as_secs_f64(),
        actual_fps,
        declared_fps = fps,
        "Video capture finished"
    );

    Ok(stats)
}

fn encode_frames<K: FrameSink>(mut sink: K, frames: Receiver<VideoFrame>) -> CoreResult<u64> {
    let mut written = 0u64;
    for frame in frames {
        sink.write_frame(&frame)?;
        written += 1;
    }
    sink.finish()?;
    Ok(written)
}
