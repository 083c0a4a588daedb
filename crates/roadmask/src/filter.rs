use image::{ColorImage, buffer_to_color, color_to_buffer};

/// Standard deviation matching a `size`-tap Gaussian:
/// `0.3 * ((size - 1) / 2 - 1) + 0.8`.
pub fn gaussian_sigma(size: usize) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Gaussian blur of a color frame, sized like a square `size` x `size`
/// kernel. Sizes of 1 and below leave the frame as is.
pub fn gaussian_blur(image: &ColorImage, size: usize) -> ColorImage {
    if size <= 1 || image.data.is_empty() {
        return image.clone();
    }
    let sigma = gaussian_sigma(size);
    let blurred = imageproc::filter::gaussian_blur_f32(&color_to_buffer(image), sigma);
    buffer_to_color(blurred, image.format)
}
