use crate::{CoreResult, video::VideoFrame};

/// Consumer of encoded-order frames, e.g. an encoder process.
pub trait FrameSink {
    /// Append one frame. Frames are implicitly spaced at the sink's
    /// declared frame rate.
    fn write_frame(&mut self, frame: &VideoFrame) -> CoreResult<()>;

    /// Flush and close the output.
    fn finish(self) -> CoreResult<()>
    where
        Self: Sized;
}
