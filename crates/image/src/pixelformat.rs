use crate::*;

/// Channel order of an interleaved 3-channel color frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Bgr8,
}

impl PixelFormat {
    /// Parse a sensor encoding name such as `"bgr8"`.
    pub fn from_encoding(encoding: &str) -> Result<Self, ImageError> {
        match encoding {
            "rgb8" => Ok(PixelFormat::Rgb8),
            "bgr8" => Ok(PixelFormat::Bgr8),
            other => Err(ImageError::Format(format!(
                "unsupported color encoding: {other}"
            ))),
        }
    }

    pub fn as_encoding(&self) -> &'static str {
        match self {
            PixelFormat::Rgb8 => "rgb8",
            PixelFormat::Bgr8 => "bgr8",
        }
    }

    /// Reorder one stored sample into `(r, g, b)`.
    #[inline]
    pub fn to_rgb(&self, px: [u8; 3]) -> (u8, u8, u8) {
        match self {
            PixelFormat::Rgb8 => (px[0], px[1], px[2]),
            PixelFormat::Bgr8 => (px[2], px[1], px[0]),
        }
    }

    /// Reorder `(r, g, b)` into this format's stored order.
    #[inline]
    pub fn from_rgb(&self, r: u8, g: u8, b: u8) -> [u8; 3] {
        match self {
            PixelFormat::Rgb8 => [r, g, b],
            PixelFormat::Bgr8 => [b, g, r],
        }
    }
}
