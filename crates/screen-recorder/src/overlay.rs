//! Full-screen region selection overlay.
//!
//! Shows a dimmed still of the primary monitor; dragging reveals the
//! selected rectangle at full brightness. Releasing the mouse ends the
//! selection, Escape abandons it.

use crate::{
    AppError, AppResult,
    window_surface::{WindowSurface, pack_image},
};

use std::panic::Location;

use error_location::ErrorLocation;
use image::{RgbaImage, imageops};
use screen_recorder_core::{
    CoreResult, DragTracker, Region, ScreenPoint, ScreenSource, XcapScreen,
};
use tao::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::EventLoopWindowTarget,
    keyboard::KeyCode,
    window::{CursorIcon, Fullscreen, WindowBuilder, WindowId},
};
use tracing::{debug, info, instrument, warn};

/// Brightness of the area outside the selection.
const DIM_GAIN: f32 = 0.45;
/// Selection border colour.
const BORDER_COLOR: u32 = 0x00FF_FFFF;

/// What a window event meant for the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayOutcome {
    /// Keep going.
    Continue,
    /// The user finished a drag.
    Selected(Region),
    /// The user dismissed the overlay.
    Cancelled,
}

struct Backdrop {
    width: u32,
    height: u32,
    dim: Vec<u32>,
    bright: Vec<u32>,
}

/// The selection overlay window.
pub struct RegionOverlay {
    surface: WindowSurface,
    bounds: Region,
    still: RgbaImage,
    backdrop: Option<Backdrop>,
    tracker: DragTracker,
    cursor: ScreenPoint,
}

impl RegionOverlay {
    /// Grab the primary monitor and open the overlay over it.
    #[instrument(skip(target))]
    pub fn open<T: 'static>(target: &EventLoopWindowTarget<T>) -> AppResult<Self> {
        let (bounds, still) = grab_primary()?;

        let window = WindowBuilder::new()
            .with_title("Select Region")
            .with_decorations(false)
            .with_always_on_top(true)
            .with_fullscreen(Some(Fullscreen::Borderless(None)))
            .build(target)
            .map_err(|e| AppError::WindowError {
                reason: format!("Failed to open overlay: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;
        window.set_cursor_icon(CursorIcon::Crosshair);

        let surface = WindowSurface::new(window)?;
        info!(?bounds, "Region overlay opened");

        Ok(Self {
            surface,
            bounds,
            still,
            backdrop: None,
            tracker: DragTracker::new(),
            cursor: ScreenPoint::new(bounds.x, bounds.y),
        })
    }

    /// Id used to route window events here.
    pub fn window_id(&self) -> WindowId {
        self.surface.window().id()
    }

    /// Feed a window event; returns what it meant for the selection.
    pub fn handle_event(&mut self, event: &WindowEvent) -> OverlayOutcome {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let (width, height) = self.surface.size();
                self.cursor = window_to_screen(position.x, position.y, width, height, &self.bounds);
                if self.tracker.is_dragging() {
                    self.tracker.drag(self.cursor);
                    self.surface.window().request_redraw();
                }
                OverlayOutcome::Continue
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    self.tracker.press(self.cursor);
                    OverlayOutcome::Continue
                }
                ElementState::Released => match self.tracker.release(self.cursor) {
                    Some(Ok(region)) => OverlayOutcome::Selected(region),
                    Some(Err(e)) => {
                        debug!(error = ?e, "Selection too small, waiting for another drag");
                        self.surface.window().request_redraw();
                        OverlayOutcome::Continue
                    }
                    None => OverlayOutcome::Continue,
                },
                _ => OverlayOutcome::Continue,
            },
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: KeyCode::Escape,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            }
            | WindowEvent::CloseRequested => OverlayOutcome::Cancelled,
            WindowEvent::Resized(_) => {
                self.backdrop = None;
                self.surface.window().request_redraw();
                OverlayOutcome::Continue
            }
            _ => OverlayOutcome::Continue,
        }
    }

    /// Draw the backdrop and the current selection.
    #[track_caller]
    pub fn redraw(&mut self) -> AppResult<()> {
        let (width, height) = self.surface.size();
        if width == 0 || height == 0 {
            return Ok(());
        }

        let stale = self
            .backdrop
            .as_ref()
            .is_none_or(|b| b.width != width || b.height != height);
        if stale {
            let scaled =
                imageops::resize(&self.still, width, height, imageops::FilterType::Triangle);
            self.backdrop = Some(Backdrop {
                width,
                height,
                dim: pack_image(&scaled, DIM_GAIN),
                bright: pack_image(&scaled, 1.0),
            });
        }
        let Some(backdrop) = self.backdrop.as_ref() else {
            return Ok(());
        };

        let mut pixels = backdrop.dim.clone();
        if let Some(selection) = self.tracker.current() {
            let rect = screen_to_window(&selection, width, height, &self.bounds);
            draw_selection(&mut pixels, &backdrop.bright, width, rect);
        }

        self.surface.present(width, height, &pixels)
    }
}

fn grab_primary() -> CoreResult<(Region, RgbaImage)> {
    let mut screen = XcapScreen::primary()?;
    let bounds = screen.bounds();
    let still = match screen.grab(&bounds) {
        Ok(image) => image,
        Err(e) => {
            warn!(error = ?e, "Could not grab the screen for the overlay, using a blank backdrop");
            RgbaImage::new(bounds.width.max(1), bounds.height.max(1))
        }
    };
    Ok((bounds, still))
}

/// Map a window pixel position to screen coordinates.
pub(crate) fn window_to_screen(
    x: f64,
    y: f64,
    window_width: u32,
    window_height: u32,
    bounds: &Region,
) -> ScreenPoint {
    let scale_x = f64::from(bounds.width) / f64::from(window_width.max(1));
    let scale_y = f64::from(bounds.height) / f64::from(window_height.max(1));
    ScreenPoint::new(
        bounds.x + (x.max(0.0) * scale_x).round() as i32,
        bounds.y + (y.max(0.0) * scale_y).round() as i32,
    )
}

/// Map a screen rectangle to `(left, top, right, bottom)` window pixels,
/// clipped to the window.
pub(crate) fn screen_to_window(
    region: &Region,
    window_width: u32,
    window_height: u32,
    bounds: &Region,
) -> (u32, u32, u32, u32) {
    let scale_x = f64::from(window_width) / f64::from(bounds.width.max(1));
    let scale_y = f64::from(window_height) / f64::from(bounds.height.max(1));
    let to_x = |v: i64| {
        ((v - i64::from(bounds.x)) as f64 * scale_x).clamp(0.0, f64::from(window_width)) as u32
    };
    let to_y = |v: i64| {
        ((v - i64::from(bounds.y)) as f64 * scale_y).clamp(0.0, f64::from(window_height)) as u32
    };
    (
        to_x(i64::from(region.x)),
        to_y(i64::from(region.y)),
        to_x(region.right()),
        to_y(region.bottom()),
    )
}

fn draw_selection(pixels: &mut [u32], bright: &[u32], width: u32, rect: (u32, u32, u32, u32)) {
    let (left, top, right, bottom) = rect;
    let width = width as usize;
    for y in top..bottom {
        let row = y as usize * width;
        for x in left..right {
            let i = row + x as usize;
            let edge = x == left || x + 1 == right || y == top || y + 1 == bottom;
            pixels[i] = if edge { BORDER_COLOR } else { bright[i] };
        }
    }
}
