//! System tray icon and menu.
//!
//! The tray menu is the recorder's whole control surface: record, region
//! selection, pause/resume/stop, audio source toggles and the elapsed-time
//! label. Enablement always mirrors the [`MenuState`] pushed by the app.

use crate::{AppError, AppResult, MenuIds, MenuState, TrayIconState};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{info, instrument};
use tray_icon::{
    Icon, TrayIcon, TrayIconBuilder,
    menu::{CheckMenuItem, IsMenuItem, Menu, MenuItem, PredefinedMenuItem},
};

/// Edge length of the generated tray icons.
const ICON_SIZE: u32 = 32;

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    record: MenuItem,
    select_region: MenuItem,
    stop: MenuItem,
    pause: MenuItem,
    resume: MenuItem,
    microphone: CheckMenuItem,
    system: CheckMenuItem,
    elapsed: MenuItem,
    open_folder: MenuItem,
    exit: MenuItem,
    state: Option<MenuState>,
}

impl TrayManager {
    /// Create the tray icon and menu in the idle state.
    #[track_caller]
    #[instrument(skip(initial))]
    pub fn new(initial: MenuState) -> AppResult<Self> {
        let menu = Menu::new();

        let record = MenuItem::new("Record", true, None);
        let select_region = MenuItem::new("Select Region", true, None);
        let stop = MenuItem::new("Stop", false, None);
        let pause = MenuItem::new("Pause", false, None);
        let resume = MenuItem::new("Resume", false, None);
        let microphone = CheckMenuItem::new("Microphone Audio", true, initial.microphone, None);
        let system = CheckMenuItem::new("System Audio", true, initial.system, None);
        let elapsed = MenuItem::new("00:00:00", false, None);
        let open_folder = MenuItem::new("Open Recordings Folder", true, None);
        let exit = MenuItem::new("Exit", true, None);

        let separators = [
            PredefinedMenuItem::separator(),
            PredefinedMenuItem::separator(),
            PredefinedMenuItem::separator(),
        ];
        let items: [&dyn IsMenuItem; 13] = [
            &record,
            &select_region,
            &stop,
            &pause,
            &resume,
            &separators[0],
            &microphone,
            &system,
            &separators[1],
            &elapsed,
            &separators[2],
            &open_folder,
            &exit,
        ];
        for item in items {
            menu.append(item).map_err(|e| AppError::TrayError {
                reason: format!("Failed to add menu item: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        }

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(TrayIconState::Idle.tooltip())
            .with_menu(Box::new(menu))
            .with_icon(Self::load_icon(TrayIconState::Idle)?)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        let mut manager = Self {
            tray_icon,
            record,
            select_region,
            stop,
            pause,
            resume,
            microphone,
            system,
            elapsed,
            open_folder,
            exit,
            state: None,
        };
        manager.apply(initial)?;
        Ok(manager)
    }

    /// Ids the app uses to map menu clicks to commands.
    pub fn menu_ids(&self) -> MenuIds {
        MenuIds {
            record: self.record.id().clone(),
            select_region: self.select_region.id().clone(),
            stop: self.stop.id().clone(),
            pause: self.pause.id().clone(),
            resume: self.resume.id().clone(),
            microphone: self.microphone.id().clone(),
            system: self.system.id().clone(),
            open_folder: self.open_folder.id().clone(),
            exit: self.exit.id().clone(),
        }
    }

    /// Bring menu entries, icon and tooltip in line with `state`.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn apply(&mut self, state: MenuState) -> AppResult<()> {
        self.record.set_enabled(state.record);
        self.select_region.set_enabled(state.select_region);
        self.stop.set_enabled(state.stop);
        self.pause.set_enabled(state.pause);
        self.resume.set_enabled(state.resume);
        self.microphone.set_enabled(state.audio_toggles);
        self.system.set_enabled(state.audio_toggles);
        self.microphone.set_checked(state.microphone);
        self.system.set_checked(state.system);

        if self.state.map(|s| s.icon) != Some(state.icon) {
            self.tray_icon
                .set_icon(Some(Self::load_icon(state.icon)?))
                .map_err(|e| AppError::TrayError {
                    reason: format!("Failed to update icon: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            self.tray_icon
                .set_tooltip(Some(state.icon.tooltip()))
                .map_err(|e| AppError::TrayError {
                    reason: format!("Failed to update tooltip: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

            if state.icon == TrayIconState::Idle {
                self.elapsed.set_text("00:00:00");
            }
        }

        self.state = Some(state);
        Ok(())
    }

    /// Show `label` in the elapsed-time entry.
    pub fn set_elapsed(&mut self, label: &str) {
        self.elapsed.set_text(label);
    }

    /// Draw a filled disc in the state's colour.
    ///
    /// Generated at runtime so the binary carries no image assets.
    #[track_caller]
    fn load_icon(state: TrayIconState) -> AppResult<Icon> {
        let rgba = icon_pixels(state);
        Icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}

/// RGBA pixels of the tray icon for `state`.
pub(crate) fn icon_pixels(state: TrayIconState) -> Vec<u8> {
    let color = state.color();
    let center = (ICON_SIZE as f32 - 1.0) / 2.0;
    let radius = ICON_SIZE as f32 / 2.0 - 2.0;

    let mut rgba = Vec::with_capacity((ICON_SIZE * ICON_SIZE * 4) as usize);
    for y in 0..ICON_SIZE {
        for x in 0..ICON_SIZE {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let inside = dx * dx + dy * dy <= radius * radius;
            // Paused shows two vertical bars cut out of the disc.
            let bar = state == TrayIconState::Paused
                && (dy.abs() < radius * 0.5)
                && ((dx.abs() - radius * 0.3).abs() < radius * 0.12);
            if inside && !bar {
                rgba.extend_from_slice(&color);
            } else {
                rgba.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }
    rgba
}
