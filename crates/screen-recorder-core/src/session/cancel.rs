use std::sync::Mutex;

use crossbeam_channel::{Receiver, Sender, TryRecvError};

/// Owner side of a session's stop signal.
///
/// Cancellation closes the channel; every [`CancelToken`] then observes
/// disconnection, whether it is polling, blocked in `wait()`, or parked
/// in a `select!`.
#[derive(Debug)]
pub struct CancelHandle {
    sender: Mutex<Option<Sender<()>>>,
    receiver: Receiver<()>,
}

impl CancelHandle {
    /// Create an armed handle.
    pub fn new() -> Self {
        let (sender, receiver) = crossbeam_channel::bounded(0);
        Self {
            sender: Mutex::new(Some(sender)),
            receiver,
        }
    }

    /// A token observing this handle.
    pub fn token(&self) -> CancelToken {
        CancelToken {
            receiver: self.receiver.clone(),
        }
    }

    /// Fire the signal. Idempotent.
    pub fn cancel(&self) {
        let mut sender = self.sender.lock().unwrap_or_else(|e| e.into_inner());
        sender.take();
    }

    /// Whether `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_none()
    }
}

impl Default for CancelHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker side of a session's stop signal.
#[derive(Debug, Clone)]
pub struct CancelToken {
    receiver: Receiver<()>,
}

impl CancelToken {
    /// Non-blocking check.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.receiver.try_recv(), Err(TryRecvError::Disconnected))
    }

    /// Block until cancelled.
    pub fn wait(&self) {
        // Nothing is ever sent; recv only returns once the sender is dropped.
        let _ = self.receiver.recv();
    }

    /// Channel that becomes ready on cancellation, for `select!`.
    pub fn receiver(&self) -> &Receiver<()> {
        &self.receiver
    }
}
