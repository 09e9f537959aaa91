use crate::{CoreResult, RecorderError};

use std::panic::Location;

use error_location::ErrorLocation;

/// A point in global screen coordinates (physical pixels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPoint {
    /// Horizontal position.
    pub x: i32,
    /// Vertical position.
    pub y: i32,
}

impl ScreenPoint {
    /// Create a point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Screen rectangle designating the capture area.
///
/// Coordinates are global screen coordinates in physical pixels; the
/// rectangle spans `[x, x + width)` by `[y, y + height)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Region {
    /// Create a region, rejecting zero width or height.
    #[track_caller]
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> CoreResult<Self> {
        Self { x, y, width, height }.validated()
    }

    /// Rectangle spanned by two opposite corners, in any drag direction.
    ///
    /// The result is not validated and may have zero area.
    pub fn spanning(a: ScreenPoint, b: ScreenPoint) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: a.x.abs_diff(b.x),
            height: a.y.abs_diff(b.y),
        }
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Whether `point` lies inside the rectangle.
    pub fn contains(&self, point: ScreenPoint) -> bool {
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        px >= i64::from(self.x) && px < self.right() && py >= i64::from(self.y) && py < self.bottom()
    }

    /// Return `self` if it has a positive area.
    #[track_caller]
    pub fn validated(self) -> CoreResult<Self> {
        if self.width == 0 || self.height == 0 {
            return Err(RecorderError::EmptyRegion {
                width: self.width,
                height: self.height,
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(self)
    }

    /// Round width and height down to even values.
    ///
    /// 4:2:0 encoders reject odd dimensions, so the region handed to the
    /// encoder is aligned here instead of being padded later.
    #[track_caller]
    pub fn aligned_even(self) -> CoreResult<Self> {
        Self {
            width: self.width & !1,
            height: self.height & !1,
            ..self
        }
        .validated()
    }

    /// Intersect with `bounds` (usually the monitor rectangle).
    #[track_caller]
    pub fn clamp_to(&self, bounds: &Region) -> CoreResult<Self> {
        let left = i64::from(self.x).max(i64::from(bounds.x));
        let top = i64::from(self.y).max(i64::from(bounds.y));
        let right = self.right().min(bounds.right());
        let bottom = self.bottom().min(bounds.bottom());

        if right <= left || bottom <= top {
            return Err(RecorderError::EmptyRegion {
                width: 0,
                height: 0,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        // Both edges come from i32 inputs and the spans are bounded by the
        // u32 sizes, so the narrowing casts are lossless.
        Ok(Self {
            x: left as i32,
            y: top as i32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    /// Position of this region relative to the origin of `bounds`.
    pub fn relative_to(&self, bounds: &Region) -> (u32, u32) {
        (
            self.x.saturating_sub(bounds.x).max(0) as u32,
            self.y.saturating_sub(bounds.y).max(0) as u32,
        )
    }
}

/// What part of the display a session records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureArea {
    /// The whole primary display.
    #[default]
    FullScreen,
    /// A user-selected rectangle.
    Region(Region),
}

impl CaptureArea {
    /// Resolve to a concrete, encoder-ready rectangle inside `bounds`.
    #[track_caller]
    pub fn resolve(&self, bounds: &Region) -> CoreResult<Region> {
        match self {
            CaptureArea::FullScreen => bounds.aligned_even(),
            CaptureArea::Region(region) => region.validated()?.clamp_to(bounds)?.aligned_even(),
        }
    }
}
