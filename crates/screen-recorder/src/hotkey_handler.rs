//! Global hotkeys.
//!
//! Registers CTRL+SHIFT+R (record/stop), CTRL+SHIFT+P (pause/resume) and
//! CTRL+SHIFT+S (select region) and forwards presses to the application
//! as [`AppCommand`]s. Session state lives in the app; hotkeys only ever
//! send toggles.

use crate::{AppCommand, AppError, AppResult};

use std::{panic::Location, time::Duration};

use error_location::ErrorLocation;
use global_hotkey::{
    GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState,
    hotkey::{Code, HotKey, Modifiers},
};
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

/// Ids of the registered hotkeys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotkeyBindings {
    /// CTRL+SHIFT+R
    pub toggle_recording: u32,
    /// CTRL+SHIFT+P
    pub toggle_pause: u32,
    /// CTRL+SHIFT+S
    pub select_region: u32,
}

impl HotkeyBindings {
    /// The hotkeys, with their display names.
    pub fn hotkeys() -> [(HotKey, &'static str); 3] {
        let modifiers = Some(Modifiers::CONTROL | Modifiers::SHIFT);
        [
            (HotKey::new(modifiers, Code::KeyR), "CTRL+SHIFT+R"),
            (HotKey::new(modifiers, Code::KeyP), "CTRL+SHIFT+P"),
            (HotKey::new(modifiers, Code::KeyS), "CTRL+SHIFT+S"),
        ]
    }

    /// Bindings for the ids of [`HotkeyBindings::hotkeys`].
    pub fn from_hotkeys(hotkeys: &[(HotKey, &'static str); 3]) -> Self {
        Self {
            toggle_recording: hotkeys[0].0.id(),
            toggle_pause: hotkeys[1].0.id(),
            select_region: hotkeys[2].0.id(),
        }
    }

    /// Command for a hotkey event. Key releases are ignored.
    pub fn command_for(&self, id: u32, state: HotKeyState) -> Option<AppCommand> {
        if state != HotKeyState::Pressed {
            return None;
        }
        if id == self.toggle_recording {
            Some(AppCommand::ToggleRecording)
        } else if id == self.toggle_pause {
            Some(AppCommand::TogglePause)
        } else if id == self.select_region {
            Some(AppCommand::SelectRegion)
        } else {
            None
        }
    }
}

/// Forwards global hotkey presses to the app.
pub struct HotkeyHandler {
    bindings: HotkeyBindings,
    command_tx: mpsc::Sender<AppCommand>,
}

impl HotkeyHandler {
    /// Register the global hotkeys.
    ///
    /// Must be called on a thread with a message pump (e.g. the main thread
    /// running a `tao` event loop) so that `WM_HOTKEY` messages are
    /// dispatched on Windows. The returned [`GlobalHotKeyManager`] must be
    /// kept alive on that thread for the hotkeys to remain registered.
    #[track_caller]
    #[instrument]
    pub fn register_hotkeys() -> AppResult<(GlobalHotKeyManager, HotkeyBindings)> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| AppError::HotkeyRegistrationFailed {
                reason: format!("Failed to create manager: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let hotkeys = HotkeyBindings::hotkeys();
        for (hotkey, name) in &hotkeys {
            manager
                .register(*hotkey)
                .map_err(|e| AppError::HotkeyRegistrationFailed {
                    reason: format!("Failed to register {}: {}", name, e),
                    location: ErrorLocation::from(Location::caller()),
                })?;
            info!(hotkey = name, "Global hotkey registered");
        }

        Ok((manager, HotkeyBindings::from_hotkeys(&hotkeys)))
    }

    /// Create a handler for previously registered hotkeys.
    ///
    /// This struct is `Send` and can live on any thread; it only listens
    /// on the global [`GlobalHotKeyEvent`] channel.
    pub fn new(bindings: HotkeyBindings, command_tx: mpsc::Sender<AppCommand>) -> Self {
        Self {
            bindings,
            command_tx,
        }
    }

    /// Run the hotkey handler event loop until a shutdown signal arrives.
    #[instrument(skip(self))]
    pub async fn run(&self, mut shutdown_rx: watch::Receiver<bool>) -> AppResult<()> {
        let receiver = GlobalHotKeyEvent::receiver().clone();
        let (event_tx, mut event_rx) = mpsc::channel(32);

        // Shutdown: when event_rx is dropped (loop breaks), the next
        // event_tx.blocking_send() fails, breaking the blocking loop.
        let handle = tokio::task::spawn_blocking(move || {
            while let Ok(event) = receiver.recv() {
                if event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                _ = shutdown_rx.changed() => {
                    info!("Hotkey handler shutting down");
                    break;
                }
                Some(event) = event_rx.recv() => {
                    if let Some(command) = self.bindings.command_for(event.id, event.state) {
                        debug!(?command, "Hotkey pressed");
                        self.command_tx.send(command).await.map_err(|e| {
                            AppError::ChannelSendFailed {
                                message: format!("Failed to send hotkey command: {}", e),
                                location: ErrorLocation::from(Location::caller()),
                            }
                        })?;
                    }
                }
            }
        }

        drop(event_rx);

        // The blocking task may be stuck in recv() if no hotkey event
        // arrives after shutdown; it is cleaned up on process exit.
        match tokio::time::timeout(Duration::from_secs(1), handle).await {
            Ok(Ok(())) => debug!("Hotkey event forwarder stopped cleanly"),
            Ok(Err(e)) => warn!(error = ?e, "Hotkey event forwarder task panicked"),
            Err(_) => debug!(
                "Hotkey event forwarder did not stop within timeout, \
                   will be cleaned up on exit"
            ),
        }

        Ok(())
    }
}
