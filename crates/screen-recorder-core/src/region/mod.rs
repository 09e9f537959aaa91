mod drag;
#[allow(clippy::module_inception)]
mod region;

pub use {
    drag::DragTracker,
    region::{CaptureArea, Region, ScreenPoint},
};
