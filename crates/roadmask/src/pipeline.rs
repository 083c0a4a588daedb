use {
    crate::*,
    image::{ColorImage, DepthImage, Mask},
};

/// Everything one frame produces.
#[derive(Debug, Clone)]
pub struct CycleOutput {
    pub pothole_mask: Mask,
    pub lane_mask: Mask,
    pub pothole_depth: DepthImage,
    pub lane_depth: DepthImage,
    /// Pothole candidates followed by lane contours, each with its verdict.
    pub regions: Vec<ClassifiedRegion>,
}

impl CycleOutput {
    pub fn potholes(&self) -> impl Iterator<Item = &ClassifiedRegion> {
        self.regions.iter().filter(|r| r.category == Category::Pothole)
    }

    pub fn lanes(&self) -> impl Iterator<Item = &ClassifiedRegion> {
        self.regions.iter().filter(|r| r.category == Category::Lane)
    }
}

/// Segment, normalize, detect and project, in that order.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    segmenter: SurfaceSegmenter,
    normalizer: BackgroundNormalizer,
    potholes: PotholeDetector,
    lanes: LaneDetector,
}

impl Pipeline {
    /// Build the stages of a cycle. The ROI is clipped to each frame at run
    /// time, so only the frame-independent parameters are checked here.
    pub fn new(config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate_parameters()?;
        Ok(Self {
            segmenter: SurfaceSegmenter::new(&config),
            normalizer: BackgroundNormalizer::new(&config),
            potholes: PotholeDetector::new(&config),
            lanes: LaneDetector::new(&config),
            config,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&self, color: &ColorImage, depth: &DepthImage) -> Result<CycleOutput, FrameError> {
        self.run_with(color, depth, &mut NoDiagnostics)
    }

    pub fn run_with(
        &self,
        color: &ColorImage,
        depth: &DepthImage,
        diagnostics: &mut dyn Diagnostics,
    ) -> Result<CycleOutput, FrameError> {
        if depth.size != color.size {
            return Err(FrameError::SizeMismatch {
                expected: color.size,
                got: depth.size,
            });
        }

        let surface = self.segmenter.segment(color);
        diagnostics.mask(Stage::Surface, &surface);

        let normalized = self.normalizer.normalize(color, &surface, diagnostics);
        let potholes = self.potholes.detect(&normalized.blurred, diagnostics);
        let lanes = self.lanes.detect(
            &normalized.everything,
            &potholes.fill,
            &potholes.mask,
            diagnostics,
        );

        let lane_source = match self.config.lane_depth_source {
            LaneDepthSource::LaneMask => &lanes.mask,
            LaneDepthSource::EverythingMask => &normalized.everything,
        };
        let pothole_depth = project_depth(depth, &potholes.mask);
        let lane_depth = project_depth(depth, lane_source);

        let mut regions = potholes.regions;
        regions.extend(lanes.regions);

        Ok(CycleOutput {
            pothole_mask: potholes.mask,
            lane_mask: lanes.mask,
            pothole_depth,
            lane_depth,
            regions,
        })
    }
}
