use {
    crate::*,
    base::{Rect, Vec2},
    serde::{Deserialize, Serialize},
};

/// Inclusive HSV box, hue in 0..=179.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub low: [u8; 3],
    pub high: [u8; 3],
}

impl Default for HsvRange {
    fn default() -> Self {
        // bright, nearly unsaturated: painted and wet road surface
        Self {
            low: [0, 0, 153],
            high: [179, 35, 255],
        }
    }
}

impl HsvRange {
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        (0..3).all(|c| self.low[c] <= hsv[c] && hsv[c] <= self.high[c])
    }
}

/// Inclusive contour area band in square pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaBand {
    pub min: f64,
    pub max: f64,
}

impl Default for AreaBand {
    fn default() -> Self {
        Self {
            min: 2000.0,
            max: 8000.0,
        }
    }
}

impl AreaBand {
    pub fn contains(&self, area: f64) -> bool {
        self.min <= area && area <= self.max
    }
}

/// Every tunable of the classification pipeline.
///
/// Missing fields deserialize to their defaults, so a configuration file only
/// needs to name what it changes. Call `validate` once before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Color box selecting candidate road surface.
    pub surface: HsvRange,
    /// Only pixels inside this rectangle are ever classified.
    pub roi: Rect<usize>,
    /// Gaussian kernel applied to the masked color frame.
    pub blur_kernel: usize,
    /// Dilation kernel producing the background estimate.
    pub background_kernel: usize,
    /// Canny hysteresis thresholds on the L1 gradient magnitude.
    pub canny_low: f32,
    pub canny_high: f32,
    /// Dilation kernel for the edge map reported to diagnostics.
    pub edge_dilation_kernel: usize,
    /// How many of the largest edge contours are considered as potholes.
    pub max_candidates: usize,
    /// Polygon approximation tolerance as a fraction of the arc length.
    pub approx_epsilon: f64,
    /// Smallest vertex count of the approximated polygon still taken as a pothole.
    pub min_vertices: usize,
    /// Erosion kernel used to clean both the pothole and the lane masks.
    pub erosion_kernel: usize,
    pub lane_area: AreaBand,
    pub lane_depth_source: LaneDepthSource,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            surface: HsvRange::default(),
            roi: Rect::new(Vec2::new(0, 500), Vec2::new(1280, 220)),
            blur_kernel: 11,
            background_kernel: 11,
            canny_low: 50.0,
            canny_high: 150.0,
            edge_dilation_kernel: 3,
            max_candidates: 5,
            approx_epsilon: 0.01,
            min_vertices: 8,
            erosion_kernel: 3,
            lane_area: AreaBand::default(),
            lane_depth_source: LaneDepthSource::LaneMask,
        }
    }
}

// largest square window whose radius fits the morphology kernel
const MAX_KERNEL: usize = 511;

fn check_kernel(name: &'static str, size: usize) -> Result<(), ConfigError> {
    if size == 0 || size % 2 == 0 || size > MAX_KERNEL {
        return Err(ConfigError::Kernel { name, size });
    }
    Ok(())
}

impl PipelineConfig {
    /// Check the configuration against the frame size it will run on.
    pub fn validate(&self, frame: Vec2<usize>) -> Result<(), ConfigError> {
        self.validate_parameters()?;
        if !Rect::covering(frame).contains_rect(self.roi) {
            return Err(ConfigError::Roi {
                roi: self.roi,
                frame,
            });
        }
        if self.lane_depth_source == LaneDepthSource::EverythingMask {
            log::warn!("lane depth taken from the unfiltered surface mask, not the lane mask");
        }
        Ok(())
    }

    /// Every check that does not depend on the frame size.
    pub fn validate_parameters(&self) -> Result<(), ConfigError> {
        for hue in [self.surface.low[0], self.surface.high[0]] {
            if hue > 179 {
                return Err(ConfigError::Hue(hue));
            }
        }
        if (0..3).any(|c| self.surface.low[c] > self.surface.high[c]) {
            return Err(ConfigError::Range { name: "surface" });
        }
        check_kernel("blur", self.blur_kernel)?;
        check_kernel("background", self.background_kernel)?;
        check_kernel("edge dilation", self.edge_dilation_kernel)?;
        check_kernel("erosion", self.erosion_kernel)?;
        if !(0.0 <= self.canny_low && self.canny_low <= self.canny_high) {
            return Err(ConfigError::Range { name: "canny" });
        }
        if self.max_candidates == 0 {
            return Err(ConfigError::Candidates);
        }
        if !(self.approx_epsilon > 0.0) {
            return Err(ConfigError::Tolerance(self.approx_epsilon));
        }
        if self.min_vertices < 3 {
            return Err(ConfigError::Invalid(format!(
                "min_vertices must be at least 3, got {}",
                self.min_vertices
            )));
        }
        if !(0.0 <= self.lane_area.min && self.lane_area.min <= self.lane_area.max) {
            return Err(ConfigError::Range { name: "lane area" });
        }
        Ok(())
    }
}
