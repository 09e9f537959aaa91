//! Live preview window showing the latest captured frame.

use crate::{
    AppError, AppResult,
    window_surface::{WindowSurface, pack_image},
};

use std::panic::Location;

use error_location::ErrorLocation;
use image::{RgbaImage, imageops};
use tao::{
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::EventLoopWindowTarget,
    keyboard::KeyCode,
    window::{WindowBuilder, WindowId},
};
use tracing::{debug, instrument};

/// Widest the preview window gets, in physical pixels.
pub const PREVIEW_MAX_WIDTH: u32 = 640;

/// What a window event meant for the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Nothing to do.
    Continue,
    /// The user asked to stop recording from the preview.
    StopRequested,
    /// The user closed the preview; recording goes on.
    Closed,
}

/// Preview window.
pub struct PreviewWindow {
    surface: WindowSurface,
    frame_size: Option<(u32, u32)>,
}

impl PreviewWindow {
    /// Open a hidden-until-first-frame preview window.
    #[instrument(skip(target))]
    pub fn open<T: 'static>(target: &EventLoopWindowTarget<T>) -> AppResult<Self> {
        let window = WindowBuilder::new()
            .with_title("Recording Preview")
            .with_resizable(false)
            .with_inner_size(PhysicalSize::new(PREVIEW_MAX_WIDTH, PREVIEW_MAX_WIDTH * 9 / 16))
            .build(target)
            .map_err(|e| AppError::WindowError {
                reason: format!("Failed to open preview: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            surface: WindowSurface::new(window)?,
            frame_size: None,
        })
    }

    /// Id used to route window events here.
    pub fn window_id(&self) -> WindowId {
        self.surface.window().id()
    }

    /// Draw `frame`, resizing the window when the frame shape changes.
    pub fn show_frame(&mut self, frame: &RgbaImage) -> AppResult<()> {
        let frame_size = (frame.width(), frame.height());
        if self.frame_size != Some(frame_size) {
            let (width, height) = preview_size(frame_size.0, frame_size.1);
            debug!(width, height, "Sizing preview window");
            self.surface
                .window()
                .set_inner_size(PhysicalSize::new(width, height));
            self.frame_size = Some(frame_size);
        }

        // The window may not have taken the new size yet; draw at whatever it has.
        let (width, height) = self.surface.size();
        if width == 0 || height == 0 {
            return Ok(());
        }
        let pixels = if frame_size == (width, height) {
            pack_image(frame, 1.0)
        } else {
            let scaled = imageops::resize(frame, width, height, imageops::FilterType::Triangle);
            pack_image(&scaled, 1.0)
        };
        self.surface.present(width, height, &pixels)
    }

    /// Feed a window event.
    pub fn handle_event(&self, event: &WindowEvent) -> PreviewOutcome {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: KeyCode::Escape | KeyCode::KeyQ,
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => PreviewOutcome::StopRequested,
            WindowEvent::CloseRequested => PreviewOutcome::Closed,
            _ => PreviewOutcome::Continue,
        }
    }
}

/// Window size for a `width` x `height` frame: at most
/// [`PREVIEW_MAX_WIDTH`] wide, aspect preserved, never zero.
pub(crate) fn preview_size(width: u32, height: u32) -> (u32, u32) {
    if width <= PREVIEW_MAX_WIDTH {
        return (width.max(1), height.max(1));
    }
    let scaled = u64::from(height) * u64::from(PREVIEW_MAX_WIDTH) / u64::from(width);
    (PREVIEW_MAX_WIDTH, (scaled as u32).max(1))
}
