use crate::{
    clock::SessionClock,
    session::{CancelHandle, CancelToken, PreviewSlot},
};

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use uuid::Uuid;

/// State shared between the session owner and its capture workers.
///
/// Workers only ever read the pause flag, observe the cancel token and
/// publish preview frames; they hold no reference to any UI object.
#[derive(Debug)]
pub struct SessionControl {
    session_id: Uuid,
    paused: AtomicBool,
    clock: Mutex<SessionClock>,
    cancel: CancelHandle,
    preview: Arc<PreviewSlot>,
}

impl SessionControl {
    /// Open a session; the clock starts now.
    pub fn new(preview: Arc<PreviewSlot>) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            paused: AtomicBool::new(false),
            clock: Mutex::new(SessionClock::start(Instant::now())),
            cancel: CancelHandle::new(),
            preview,
        }
    }

    /// Identifier used for log correlation.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Whether capture is suspended.
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// Suspend capture and freeze the clock.
    pub fn pause(&self) {
        self.clock
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pause(Instant::now());
        self.paused.store(true, Ordering::Release);
    }

    /// Resume capture and the clock.
    pub fn resume(&self) {
        self.paused.store(false, Ordering::Release);
        self.clock
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .resume(Instant::now());
    }

    /// Recorded time excluding pauses.
    pub fn elapsed(&self) -> Duration {
        self.clock.lock().unwrap_or_else(|e| e.into_inner()).elapsed()
    }

    /// Signal every worker to finish.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether the stop signal has fired.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Token for a worker thread.
    pub fn token(&self) -> CancelToken {
        self.cancel.token()
    }

    /// Latest-frame mailbox for the preview window.
    pub fn preview(&self) -> &PreviewSlot {
        &self.preview
    }
}
