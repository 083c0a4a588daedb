use {
    crate::*,
    image::{ColorImage, Mask, MaskOps, to_gray},
};

/// Output of background normalization.
#[derive(Debug, Clone)]
pub struct Normalized {
    /// Masked and blurred color frame, input to edge detection.
    pub blurred: ColorImage,
    /// Everything bright on the road surface after shading correction.
    pub everything: Mask,
}

/// Flattens uneven lighting before binarizing the surface.
#[derive(Debug, Clone)]
pub struct BackgroundNormalizer {
    pub blur_kernel: usize,
    pub background_kernel: usize,
}

impl BackgroundNormalizer {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            blur_kernel: config.blur_kernel,
            background_kernel: config.background_kernel,
        }
    }

    pub fn normalize(
        &self,
        image: &ColorImage,
        surface: &Mask,
        diagnostics: &mut dyn Diagnostics,
    ) -> Normalized {
        let blurred = gaussian_blur(&image.masked(surface), self.blur_kernel);
        let gray = to_gray(&blurred);

        let (level, foreground) = otsu(&gray, u8::MAX);
        log::trace!("foreground otsu level {}", level);
        let foreground_mask = nonzero(&foreground);
        let background = dilate(&foreground_mask, self.background_kernel);
        let flattened = divide(&foreground, &background.to_gray(), 255.0);
        let (_, everything) = otsu(&flattened, u8::MAX);

        let everything = nonzero(&everything);
        diagnostics.mask(Stage::Foreground, &foreground_mask);
        diagnostics.mask(Stage::Background, &background);
        diagnostics.mask(Stage::Everything, &everything);

        Normalized {
            blurred,
            everything,
        }
    }
}
