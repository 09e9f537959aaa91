use crate::{CoreResult, RecorderError, region::Region};

use std::panic::Location;

use error_location::ErrorLocation;
use image::{RgbaImage, imageops};
use tracing::{debug, info, instrument};
use xcap::Monitor;

/// Something that can produce the pixels of a screen rectangle.
pub trait ScreenSource {
    /// Rectangle of the display in global screen coordinates.
    fn bounds(&self) -> Region;

    /// Capture `region` (inside `bounds`). The image is exactly
    /// `region.width` x `region.height`.
    fn grab(&mut self, region: &Region) -> CoreResult<RgbaImage>;
}

/// Primary-monitor capture through `xcap`.
pub struct XcapScreen {
    monitor: Monitor,
    bounds: Region,
}

impl XcapScreen {
    /// Open the primary monitor, or the first one if none is flagged primary.
    #[track_caller]
    #[instrument]
    pub fn primary() -> CoreResult<Self> {
        let monitors = Monitor::all().map_err(|e| RecorderError::CaptureFailed {
            reason: format!("Failed to enumerate monitors: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let count = monitors.len();
        let monitor = match monitors.iter().position(Monitor::is_primary) {
            Some(index) => monitors.into_iter().nth(index),
            None => monitors.into_iter().next(),
        }
        .ok_or(RecorderError::NoDisplayFound {
            location: ErrorLocation::from(Location::caller()),
        })?;

        let bounds = Region {
            x: monitor.x(),
            y: monitor.y(),
            width: monitor.width(),
            height: monitor.height(),
        };

        info!(
            monitor = monitor.name(),
            monitors = count,
            ?bounds,
            scale_factor = monitor.scale_factor(),
            "Screen source opened"
        );

        Ok(Self { monitor, bounds })
    }
}

impl ScreenSource for XcapScreen {
    fn bounds(&self) -> Region {
        self.bounds
    }

    #[track_caller]
    fn grab(&mut self, region: &Region) -> CoreResult<RgbaImage> {
        let image = self
            .monitor
            .capture_image()
            .map_err(|e| RecorderError::CaptureFailed {
                reason: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(crop_to_region(image, &self.bounds, region))
    }
}

/// Cut `region` out of a full-monitor `image` covering `bounds`.
///
/// The image may be at a different pixel density than `bounds` (HiDPI
/// backends), so the crop is scaled and the result resized back to the
/// region's size.
pub(crate) fn crop_to_region(image: RgbaImage, bounds: &Region, region: &Region) -> RgbaImage {
    if image.width() == region.width && image.height() == region.height && region == bounds {
        return image;
    }
    if image.width() == 0 || image.height() == 0 {
        return RgbaImage::new(region.width, region.height);
    }

    let scale_x = f64::from(image.width()) / f64::from(bounds.width.max(1));
    let scale_y = f64::from(image.height()) / f64::from(bounds.height.max(1));
    let (rel_x, rel_y) = region.relative_to(bounds);

    let x = ((f64::from(rel_x) * scale_x) as u32).min(image.width().saturating_sub(1));
    let y = ((f64::from(rel_y) * scale_y) as u32).min(image.height().saturating_sub(1));
    let width = ((f64::from(region.width) * scale_x).round() as u32)
        .clamp(1, image.width() - x);
    let height = ((f64::from(region.height) * scale_y).round() as u32)
        .clamp(1, image.height() - y);

    let cropped = imageops::crop_imm(&image, x, y, width, height).to_image();

    if cropped.width() == region.width && cropped.height() == region.height {
        cropped
    } else {
        debug!(
            from_width = cropped.width(),
            from_height = cropped.height(),
            to_width = region.width,
            to_height = region.height,
            "Rescaling captured region"
        );
        imageops::resize(
            &cropped,
            region.width,
            region.height,
            imageops::FilterType::Triangle,
        )
    }
}
