//! Screen Recorder: tray-driven screen and audio recording to MP4.

mod app;
mod app_command;
mod config;
mod error;
mod hotkey_handler;
mod logging;
mod menu_ids;
mod menu_state;
mod output_handler;
mod overlay;
mod preview;
#[cfg(test)]
mod tests;
mod tray_icon_state;
mod tray_manager;
mod ui_command;
mod window_surface;

pub(crate) use {
    app::App,
    app_command::AppCommand,
    error::{AppError, Result as AppResult},
    hotkey_handler::HotkeyHandler,
    menu_ids::MenuIds,
    menu_state::MenuState,
    output_handler::OutputHandler,
    overlay::{OverlayOutcome, RegionOverlay},
    preview::{PreviewOutcome, PreviewWindow},
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
    ui_command::UiCommand,
};

use crate::config::Config;

use std::sync::{Arc, Mutex};

use global_hotkey::GlobalHotKeyManager;
use screen_recorder_core::{PreviewSlot, Recorder, SessionPhase, list_input_devices};
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

/// Application entry point.
fn main() {
    let _log_guard = logging::init_tracing();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:?}", e);
            std::process::exit(1);
        }
    };
    let audio = config.audio_selection();

    let event_loop = EventLoopBuilder::<UiCommand>::with_user_event().build();
    let ui_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    let mut tray_manager = match TrayManager::new(MenuState::for_phase(SessionPhase::Idle, audio))
    {
        Ok(tm) => tm,
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    // Overlay and preview send their results straight to the app.
    let (command_tx, command_rx) = mpsc::channel(32);
    let mut command_rx = Some(command_rx);
    let mut config = Some(config);

    let preview_slot = Arc::new(PreviewSlot::new(false));
    let waker_proxy = Mutex::new(ui_proxy.clone());
    preview_slot.set_waker(move || {
        if let Ok(proxy) = waker_proxy.lock() {
            let _ = proxy.send_event(UiCommand::PreviewFrameReady);
        }
    });

    // Persists across event loop iterations; dropping it unregisters the hotkeys.
    let mut hotkey_manager: Option<GlobalHotKeyManager> = None;
    let mut overlay: Option<RegionOverlay> = None;
    let mut preview: Option<PreviewWindow> = None;

    event_loop.run(move |event, target, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => match cmd {
                UiCommand::SetMenu(state) => {
                    if let Err(e) = tray_manager.apply(state) {
                        error!(error = ?e, "Failed to update tray menu");
                    }
                }
                UiCommand::SetElapsed(label) => tray_manager.set_elapsed(&label),
                UiCommand::OpenOverlay => match RegionOverlay::open(target) {
                    Ok(opened) => overlay = Some(opened),
                    Err(e) => {
                        error!(error = ?e, "Failed to open region overlay");
                        send_command(&command_tx, AppCommand::SelectionCancelled);
                    }
                },
                UiCommand::CloseOverlay => overlay = None,
                UiCommand::ShowPreview => {
                    if preview.is_none() {
                        match PreviewWindow::open(target) {
                            Ok(opened) => preview = Some(opened),
                            Err(e) => {
                                warn!(error = ?e, "Failed to open preview, recording without it");
                                preview_slot.set_enabled(false);
                            }
                        }
                    }
                }
                UiCommand::HidePreview => preview = None,
                UiCommand::PreviewFrameReady => {
                    if let (Some(window), Some(frame)) = (preview.as_mut(), preview_slot.take()) {
                        if let Err(e) = window.show_frame(&frame) {
                            warn!(error = ?e, "Failed to draw preview frame");
                        }
                    }
                }
                UiCommand::Shutdown => {
                    overlay = None;
                    preview = None;
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
            },
            Event::WindowEvent {
                window_id, event, ..
            } => {
                if let Some(current) = overlay.as_mut().filter(|o| o.window_id() == window_id) {
                    match current.handle_event(&event) {
                        OverlayOutcome::Continue => {}
                        OverlayOutcome::Selected(region) => {
                            overlay = None;
                            send_command(&command_tx, AppCommand::RegionSelected { region });
                        }
                        OverlayOutcome::Cancelled => {
                            overlay = None;
                            send_command(&command_tx, AppCommand::SelectionCancelled);
                        }
                    }
                } else if let Some(current) = preview.as_ref().filter(|p| p.window_id() == window_id)
                {
                    match current.handle_event(&event) {
                        PreviewOutcome::Continue => {}
                        PreviewOutcome::StopRequested => {
                            send_command(&command_tx, AppCommand::Stop);
                        }
                        PreviewOutcome::Closed => {
                            info!("Preview closed, recording continues");
                            preview_slot.set_enabled(false);
                            preview = None;
                        }
                    }
                }
            }
            Event::RedrawRequested(window_id) => {
                if let Some(current) = overlay.as_mut().filter(|o| o.window_id() == window_id) {
                    if let Err(e) = current.redraw() {
                        warn!(error = ?e, "Failed to draw region overlay");
                    }
                }
            }
            Event::NewEvents(StartCause::Init) => {
                #[cfg(target_os = "macos")]
                unsafe {
                    use core_foundation::runloop::{CFRunLoopGetMain, CFRunLoopWakeUp};
                    CFRunLoopWakeUp(CFRunLoopGetMain());
                }

                let (Some(config), Some(command_rx)) = (config.take(), command_rx.take()) else {
                    return;
                };
                let (shutdown_tx, shutdown_rx) = watch::channel(false);

                // Register hotkeys on the main thread - tao's event loop pumps
                // the Windows messages needed for WM_HOTKEY delivery.
                let bindings = match HotkeyHandler::register_hotkeys() {
                    Ok((manager, bindings)) => {
                        hotkey_manager = Some(manager);
                        Some(bindings)
                    }
                    Err(e) => {
                        warn!(error = ?e, "Hotkeys unavailable, tray menu only");
                        None
                    }
                };

                let ffmpeg = config.ffmpeg();
                match ffmpeg.version() {
                    Ok(version) => info!(%version, "Using ffmpeg"),
                    Err(e) => {
                        warn!(error = ?e, "ffmpeg not usable, recordings will fail until it is installed")
                    }
                }
                info!(devices = ?list_input_devices(), "Audio input devices");
                let recorder = Recorder::new(ffmpeg, Arc::clone(&preview_slot));

                let app = App {
                    recorder,
                    audio: config.audio_selection(),
                    config,
                    output_handler: OutputHandler::new(),
                    ui: ui_proxy.clone(),
                    command_tx: command_tx.clone(),
                    command_rx,
                    shutdown_tx,
                    menu_ids: tray_manager.menu_ids(),
                    exit_requested: false,
                };
                let hotkey_tx = command_tx.clone();

                // Spawn tokio runtime on separate thread.
                // TrayManager, windows and hotkey_manager stay on the main thread.
                std::thread::spawn(move || {
                    let rt = match tokio::runtime::Runtime::new() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    rt.block_on(async {
                        let hotkeys = async {
                            if let Some(bindings) = bindings {
                                let handler = HotkeyHandler::new(bindings, hotkey_tx);
                                if let Err(e) = handler.run(shutdown_rx).await {
                                    error!(error = ?e, "Hotkey handler error");
                                }
                            }
                        };
                        let app = async {
                            if let Err(e) = app.run().await {
                                error!(error = ?e, "App error");
                            }
                        };
                        tokio::join!(hotkeys, app);
                    });
                });
            }
            _ => {}
        }

        // Keep hotkey_manager alive in the closure for the app's lifetime.
        let _ = &hotkey_manager;
    });
}

/// Hand a command from the UI thread to the app without blocking.
fn send_command(tx: &mpsc::Sender<AppCommand>, cmd: AppCommand) {
    if let Err(e) = tx.try_send(cmd) {
        error!(error = %e, "Failed to send command to app");
    }
}
