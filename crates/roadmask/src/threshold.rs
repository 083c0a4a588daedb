use {
    base::Grid,
    image::{GrayImage, gray_to_buffer},
};

/// Otsu's threshold: the level maximizing the between-class variance of the
/// histogram.
pub fn otsu_level(image: &GrayImage) -> u8 {
    if image.data.is_empty() {
        return 0;
    }
    imageproc::contrast::otsu_level(&gray_to_buffer(image))
}

/// `max` where the sample is strictly above `level`, 0 elsewhere.
pub fn threshold_binary(image: &GrayImage, level: u8, max: u8) -> GrayImage {
    image.map(|&v| if v > level { max } else { 0 })
}

/// Binarize with Otsu's level. Returns the level and the binary image.
pub fn otsu(image: &GrayImage, max: u8) -> (u8, GrayImage) {
    let level = otsu_level(image);
    (level, threshold_binary(image, level, max))
}

/// Per-pixel `round(numerator * scale / denominator)`, saturated to 8 bits,
/// and 0 wherever the denominator is 0.
pub fn divide(numerator: &GrayImage, denominator: &GrayImage, scale: f64) -> GrayImage {
    numerator.zip_map(denominator, |&n, &d| {
        if d == 0 {
            0
        } else {
            (n as f64 * scale / d as f64).round().clamp(0.0, 255.0) as u8
        }
    })
}

/// Nonzero samples as a mask.
pub fn nonzero(image: &GrayImage) -> Grid<bool> {
    image.map(|&v| v != 0)
}
