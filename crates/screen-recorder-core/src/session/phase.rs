use crate::{CoreResult, RecorderError};

use std::panic::Location;

use error_location::ErrorLocation;

/// Lifecycle of a recording session.
///
/// `Idle -> SelectingRegion (optional) -> Recording <-> Paused -> Stopping -> Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    /// No session.
    #[default]
    Idle,
    /// The region overlay is open.
    SelectingRegion,
    /// Frames and audio are being captured.
    Recording,
    /// Capture is suspended; the session is still open.
    Paused,
    /// The finalizer is running.
    Stopping,
}

impl SessionPhase {
    /// Whether moving from `self` to `next` is a legal step.
    pub fn can_transition_to(self, next: SessionPhase) -> bool {
        use SessionPhase::*;

        matches!(
            (self, next),
            (Idle, SelectingRegion)
                | (SelectingRegion, Idle)
                | (Idle, Recording)
                | (SelectingRegion, Recording)
                | (Recording, Paused)
                | (Paused, Recording)
                | (Recording, Stopping)
                | (Paused, Stopping)
                | (Stopping, Idle)
        )
    }

    /// Checked transition.
    #[track_caller]
    pub fn transition(self, next: SessionPhase) -> CoreResult<SessionPhase> {
        if self.can_transition_to(next) {
            Ok(next)
        } else {
            Err(RecorderError::InvalidTransition {
                from: self,
                to: next,
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }

    /// Recording or paused.
    pub fn is_active(self) -> bool {
        matches!(self, SessionPhase::Recording | SessionPhase::Paused)
    }
}
