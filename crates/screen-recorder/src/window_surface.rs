use crate::{AppError, AppResult};

use std::{num::NonZeroU32, panic::Location, rc::Rc};

use error_location::ErrorLocation;
use image::RgbaImage;
use softbuffer::{Context, Surface};
use tao::window::Window;

/// A tao window with a CPU-rendered softbuffer surface.
pub struct WindowSurface {
    window: Rc<Window>,
    surface: Surface<Rc<Window>, Rc<Window>>,
    // Kept alive for the surface.
    _context: Context<Rc<Window>>,
}

impl WindowSurface {
    /// Attach a surface to `window`.
    #[track_caller]
    pub fn new(window: Window) -> AppResult<Self> {
        let window = Rc::new(window);
        let context = Context::new(Rc::clone(&window)).map_err(|e| AppError::WindowError {
            reason: format!("Failed to create softbuffer context: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        let surface =
            Surface::new(&context, Rc::clone(&window)).map_err(|e| AppError::WindowError {
                reason: format!("Failed to create softbuffer surface: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self {
            window,
            surface,
            _context: context,
        })
    }

    /// The underlying window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Current drawable size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    /// Present `pixels` (`0x00RRGGBB`, row-major) sized `width` x `height`.
    ///
    /// A zero-sized window is skipped silently.
    #[track_caller]
    pub fn present(&mut self, width: u32, height: u32, pixels: &[u32]) -> AppResult<()> {
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };
        if pixels.len() != width as usize * height as usize {
            return Err(AppError::WindowError {
                reason: format!(
                    "Pixel buffer has {} entries, expected {}x{}",
                    pixels.len(),
                    width,
                    height
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.surface.resize(w, h).map_err(|e| AppError::WindowError {
            reason: format!("Failed to resize surface: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let mut buffer = self.surface.buffer_mut().map_err(|e| AppError::WindowError {
            reason: format!("Failed to map surface buffer: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;
        buffer.copy_from_slice(pixels);
        buffer.present().map_err(|e| AppError::WindowError {
            reason: format!("Failed to present surface: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(())
    }
}

/// Pack an RGBA pixel as `0x00RRGGBB`, scaling brightness by `gain`.
pub(crate) fn pack_pixel(rgba: [u8; 4], gain: f32) -> u32 {
    let scale = |c: u8| (f32::from(c) * gain).clamp(0.0, 255.0) as u32;
    (scale(rgba[0]) << 16) | (scale(rgba[1]) << 8) | scale(rgba[2])
}

/// Pack a whole image.
pub(crate) fn pack_image(image: &RgbaImage, gain: f32) -> Vec<u32> {
    image.pixels().map(|p| pack_pixel(p.0, gain)).collect()
}
