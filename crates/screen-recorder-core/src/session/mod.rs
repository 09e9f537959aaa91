mod cancel;
mod control;
mod options;
mod phase;
mod preview;
mod recorder;

pub use {
    cancel::{CancelHandle, CancelToken},
    control::SessionControl,
    options::{DEFAULT_FPS, SessionOptions},
    phase::SessionPhase,
    preview::PreviewSlot,
    recorder::Recorder,
};
