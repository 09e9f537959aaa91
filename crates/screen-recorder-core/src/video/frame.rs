use image::RgbaImage;

/// Bytes per pixel of the encoder input format.
pub const BGR24_BYTES_PER_PIXEL: usize = 3;

/// One captured frame in the encoder's packed BGR24 layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFrame {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major packed `B, G, R` bytes, no padding.
    pub data: Vec<u8>,
}

impl VideoFrame {
    /// Convert a captured RGBA image, discarding alpha.
    pub fn from_rgba(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            data: rgba_to_bgr24(image.as_raw()),
        }
    }

    /// Byte length of a `width` x `height` frame.
    pub fn expected_len(width: u32, height: u32) -> usize {
        width as usize * height as usize * BGR24_BYTES_PER_PIXEL
    }
}

/// Swap channel order RGBA -> BGR and drop alpha.
pub(crate) fn rgba_to_bgr24(rgba: &[u8]) -> Vec<u8> {
    let mut bgr = Vec::with_capacity(rgba.len() / 4 * BGR24_BYTES_PER_PIXEL);
    for px in rgba.chunks_exact(4) {
        bgr.extend_from_slice(&[px[2], px[1], px[0]]);
    }
    bgr
}
