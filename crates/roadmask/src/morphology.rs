use {
    image::{Mask, buffer_to_mask, mask_to_buffer},
    imageproc::{distance_transform::Norm, morphology},
};

// A square `kernel` x `kernel` window is an L-infinity ball of radius kernel / 2.
fn radius(kernel: usize) -> u8 {
    u8::try_from(kernel / 2).unwrap_or(u8::MAX)
}

/// Dilate with a `kernel` x `kernel` square.
pub fn dilate(mask: &Mask, kernel: usize) -> Mask {
    if kernel <= 1 || mask.is_empty() {
        return mask.clone();
    }
    buffer_to_mask(&morphology::dilate(&mask_to_buffer(mask), Norm::LInf, radius(kernel)))
}

/// Erode with a `kernel` x `kernel` square. The raster border does not erode.
pub fn erode(mask: &Mask, kernel: usize) -> Mask {
    if kernel <= 1 || mask.is_empty() {
        return mask.clone();
    }
    buffer_to_mask(&morphology::erode(&mask_to_buffer(mask), Norm::LInf, radius(kernel)))
}
