use {
    crate::*,
    image::{Mask, MaskOps},
};

#[derive(Debug, Clone)]
pub struct LaneResult {
    pub mask: Mask,
    pub regions: Vec<ClassifiedRegion>,
}

/// Lane paint is whatever bright surface is left once potholes are removed,
/// restricted to blobs of lane-marking size.
#[derive(Debug, Clone)]
pub struct LaneDetector {
    pub erosion_kernel: usize,
    pub area: AreaBand,
}

impl LaneDetector {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            erosion_kernel: config.erosion_kernel,
            area: config.lane_area,
        }
    }

    pub fn classify(&self, contour: &Contour) -> ClassifiedRegion {
        let area = contour.area();
        let category = if !contour.is_degenerate() && self.area.contains(area) {
            Category::Lane
        } else {
            Category::Discarded
        };
        ClassifiedRegion {
            contour: contour.clone(),
            category,
            area,
            vertices: None,
        }
    }

    /// `pothole_fill` is removed from the surface before the search and
    /// `pothole_mask` is cleared from the result, so lanes never overlap the
    /// published potholes.
    pub fn detect(
        &self,
        everything: &Mask,
        pothole_fill: &Mask,
        pothole_mask: &Mask,
        diagnostics: &mut dyn Diagnostics,
    ) -> LaneResult {
        let xor = everything.xor(pothole_fill);
        let eroded = erode(&xor, self.erosion_kernel);
        diagnostics.mask(Stage::Xor, &xor);
        diagnostics.mask(Stage::ErodedXor, &eroded);

        let contours = find_contours(&eroded, Retrieval::Tree);
        diagnostics.contours(Stage::LaneContours, &contours);

        let regions: Vec<ClassifiedRegion> = contours.iter().map(|c| self.classify(c)).collect();
        for region in regions.iter().filter(|r| r.category == Category::Lane) {
            log::debug!("lane found: area {:.0}", region.area);
        }
        let filled = fill_contours(
            everything.size,
            regions
                .iter()
                .filter(|r| r.category == Category::Lane)
                .map(|r| &r.contour),
        );
        let mask = filled.and_not(pothole_mask);
        diagnostics.mask(Stage::Lanes, &mask);

        LaneResult { mask, regions }
    }
}
