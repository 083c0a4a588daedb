use {
    base::Grid,
    image::{ColorImage, Mask, buffer_to_mask, gray_to_buffer, to_gray},
};

/// Canny edges of the frame's luma.
///
/// `imageproc` smooths with its own small Gaussian before taking Sobel
/// gradients, then keeps local maxima above `high` and anything above `low`
/// connected to them.
pub fn canny(image: &ColorImage, low: f32, high: f32) -> Mask {
    if image.data.is_empty() {
        return Grid {
            size: image.size,
            data: Vec::new(),
        };
    }
    let edges = imageproc::edges::canny(&gray_to_buffer(&to_gray(image)), low, high);
    buffer_to_mask(&edges)
}
