use std::sync::{
    Mutex,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use image::RgbaImage;

type Waker = Box<dyn Fn() + Send + Sync>;

/// Single-slot mailbox carrying the most recent frame to the preview UI.
///
/// Publishing replaces any frame the UI has not picked up yet, so a slow
/// preview never holds back capture and never queues frames.
pub struct PreviewSlot {
    latest: Mutex<Option<RgbaImage>>,
    enabled: AtomicBool,
    replaced: AtomicU64,
    waker: Mutex<Option<Waker>>,
}

impl PreviewSlot {
    /// Create a slot; `enabled` controls whether frames are accepted.
    pub fn new(enabled: bool) -> Self {
        Self {
            latest: Mutex::new(None),
            enabled: AtomicBool::new(enabled),
            replaced: AtomicU64::new(0),
            waker: Mutex::new(None),
        }
    }

    /// Whether capture should bother publishing frames.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Turn the preview on or off. Disabling drops the pending frame.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
        if !enabled {
            self.latest.lock().unwrap_or_else(|e| e.into_inner()).take();
        }
    }

    /// Register a callback invoked after each publish (e.g. to wake the UI loop).
    pub fn set_waker(&self, waker: impl Fn() + Send + Sync + 'static) {
        *self.waker.lock().unwrap_or_else(|e| e.into_inner()) = Some(Box::new(waker));
    }

    /// Offer a frame, replacing the pending one.
    pub fn publish(&self, frame: RgbaImage) {
        if !self.is_enabled() {
            return;
        }

        let previous = self
            .latest
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(frame);
        if previous.is_some() {
            self.replaced.fetch_add(1, Ordering::Relaxed);
        }

        if let Some(waker) = self.waker.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
            waker();
        }
    }

    /// Take the pending frame, if any.
    pub fn take(&self) -> Option<RgbaImage> {
        self.latest.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    /// Frames overwritten before the UI consumed them.
    pub fn replaced_count(&self) -> u64 {
        self.replaced.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for PreviewSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewSlot")
            .field("enabled", &self.is_enabled())
            .field("replaced", &self.replaced_count())
            .finish_non_exhaustive()
    }
}
