use crate::{
    CoreResult,
    region::{Region, ScreenPoint},
};

use tracing::debug;

/// Tracks a single press-drag-release gesture over the selection overlay.
#[derive(Debug, Default)]
pub struct DragTracker {
    anchor: Option<ScreenPoint>,
    cursor: Option<ScreenPoint>,
}

impl DragTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a drag at `point`. A second press restarts the gesture.
    pub fn press(&mut self, point: ScreenPoint) {
        self.anchor = Some(point);
        self.cursor = Some(point);
    }

    /// Move the free corner. Ignored when no drag is in progress.
    pub fn drag(&mut self, point: ScreenPoint) {
        if self.anchor.is_some() {
            self.cursor = Some(point);
        }
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// The rectangle currently spanned, for drawing. May have zero area.
    pub fn current(&self) -> Option<Region> {
        Some(Region::spanning(self.anchor?, self.cursor?))
    }

    /// Finish the gesture at `point`.
    ///
    /// Returns `None` when no press preceded the release. Otherwise the
    /// selected rectangle, aligned to even dimensions, or an `EmptyRegion`
    /// error for a click without a drag.
    #[track_caller]
    pub fn release(&mut self, point: ScreenPoint) -> Option<CoreResult<Region>> {
        let anchor = self.anchor.take()?;
        self.cursor = None;

        let region = Region::spanning(anchor, point);
        debug!(?region, "Drag released");

        Some(region.validated().and_then(Region::aligned_even))
    }

    /// Abandon the gesture.
    pub fn cancel(&mut self) {
        self.anchor = None;
        self.cursor = None;
    }
}
