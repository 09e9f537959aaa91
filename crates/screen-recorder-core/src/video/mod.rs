mod frame;
pub(crate) mod pipeline;
pub(crate) mod screen;
mod sink;

pub(crate) use pipeline::spawn_video_capture;

pub use {
    frame::{BGR24_BYTES_PER_PIXEL, VideoFrame},
    pipeline::VideoStats,
    screen::{ScreenSource, XcapScreen},
    sink::FrameSink,
};
