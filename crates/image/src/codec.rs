use {
    crate::*,
    base::{Grid, Vec2},
    crates_image::{DynamicImage, ExtendedColorType, ImageEncoder, codecs::png::PngEncoder},
};

fn encode_png(size: Vec2<usize>, bytes: &[u8], color: ExtendedColorType) -> Result<Vec<u8>, ImageError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(bytes, size.x as u32, size.y as u32, color)
        .map_err(|e| ImageError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Decode any 8-bit color PNG into an RGB8 frame.
pub fn decode_color_png(data: &[u8]) -> Result<ColorImage, ImageError> {
    let rgb = crates_image::load_from_memory(data)?.to_rgb8();
    let (w, h) = rgb.dimensions();
    ColorImage::new(Vec2::new(w as usize, h as usize), rgb.into_raw(), PixelFormat::Rgb8)
}

/// Decode a 16-bit grayscale PNG into a depth frame.
///
/// Depth must stay lossless, so 8-bit or color PNGs are rejected rather than
/// widened.
pub fn decode_depth_png(data: &[u8]) -> Result<DepthImage, ImageError> {
    match crates_image::load_from_memory(data)? {
        DynamicImage::ImageLuma16(buf) => {
            let (w, h) = buf.dimensions();
            Ok(Grid::new(Vec2::new(w as usize, h as usize), buf.into_raw())?)
        }
        other => Err(ImageError::Format(format!(
            "depth PNG must be 16-bit grayscale, got {:?}",
            other.color()
        ))),
    }
}

pub fn encode_color_png(image: &ColorImage) -> Result<Vec<u8>, ImageError> {
    let rgb: Vec<u8> = match image.format {
        PixelFormat::Rgb8 => image.data.clone(),
        PixelFormat::Bgr8 => image
            .data
            .chunks_exact(3)
            .flat_map(|c| [c[2], c[1], c[0]])
            .collect(),
    };
    encode_png(image.size, &rgb, ExtendedColorType::Rgb8)
}

/// Encode depth as 16-bit grayscale.
pub fn encode_depth_png(depth: &DepthImage) -> Result<Vec<u8>, ImageError> {
    // the encoder takes native-endian samples and swaps to PNG byte order itself
    let bytes: Vec<u8> = depth.data.iter().flat_map(|v| v.to_ne_bytes()).collect();
    encode_png(depth.size, &bytes, ExtendedColorType::L16)
}

/// Encode a mask as 8-bit grayscale, foreground white.
pub fn encode_mask_png(mask: &Mask) -> Result<Vec<u8>, ImageError> {
    encode_png(mask.size, &mask.to_gray().data, ExtendedColorType::L8)
}
