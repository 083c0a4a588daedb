use {
    crate::{ColorImage, GrayImage, Mask, PixelFormat},
    base::{Grid, Vec2},
    crates_image::{ImageBuffer, Rgb},
};

pub use crates_image::Luma;

/// 8-bit single-channel buffer of the `image` crate.
pub type LumaBuffer = crates_image::GrayImage;

/// 8-bit interleaved 3-channel buffer of the `image` crate.
pub type RgbBuffer = crates_image::RgbImage;

fn buffer_size(width: u32, height: u32) -> Vec2<usize> {
    Vec2::new(width as usize, height as usize)
}

pub fn gray_to_buffer(gray: &GrayImage) -> LumaBuffer {
    ImageBuffer::from_fn(gray.width() as u32, gray.height() as u32, |x, y| {
        Luma([gray.get(x as usize, y as usize)])
    })
}

/// Foreground becomes 255, background 0.
pub fn mask_to_buffer(mask: &Mask) -> LumaBuffer {
    ImageBuffer::from_fn(mask.width() as u32, mask.height() as u32, |x, y| {
        Luma([if mask.get(x as usize, y as usize) { 255 } else { 0 }])
    })
}

/// Any nonzero sample is foreground.
pub fn buffer_to_mask(buffer: &LumaBuffer) -> Mask {
    let (width, height) = buffer.dimensions();
    Grid {
        size: buffer_size(width, height),
        data: buffer.as_raw().iter().map(|&v| v != 0).collect(),
    }
}

/// Channels are copied in stored order, so a BGR frame stays BGR.
pub fn color_to_buffer(image: &ColorImage) -> RgbBuffer {
    ImageBuffer::from_fn(image.width() as u32, image.height() as u32, |x, y| {
        Rgb(image.pixel(x as usize, y as usize))
    })
}

pub fn buffer_to_color(buffer: RgbBuffer, format: PixelFormat) -> ColorImage {
    let (width, height) = buffer.dimensions();
    ColorImage {
        size: buffer_size(width, height),
        data: buffer.into_raw(),
        format,
    }
}
