use {
    crate::*,
    base::{Grid, Rect},
    image::{ColorImage, Mask, rgb_to_hsv},
};

/// Selects bright, unsaturated pixels inside the region of interest.
#[derive(Debug, Clone)]
pub struct SurfaceSegmenter {
    pub range: HsvRange,
    pub roi: Rect<usize>,
}

impl SurfaceSegmenter {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            range: config.surface,
            roi: config.roi,
        }
    }

    /// Surface candidate mask; always clear outside the ROI.
    pub fn segment(&self, image: &ColorImage) -> Mask {
        let mut mask = Grid {
            size: image.size,
            data: vec![false; image.size.count()],
        };
        let Some(roi) = Rect::covering(image.size).intersection(self.roi) else {
            return mask;
        };
        let max = roi.max();
        for y in roi.origin.y..max.y {
            for x in roi.origin.x..max.x {
                let (r, g, b) = image.rgb(x, y);
                if self.range.contains(rgb_to_hsv(r, g, b)) {
                    mask.set(x, y, true);
                }
            }
        }
        mask
    }
}
