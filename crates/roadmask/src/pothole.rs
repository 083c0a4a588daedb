use {
    crate::*,
    image::{ColorImage, Mask},
};

/// What a contour was classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Pothole,
    Lane,
    Discarded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedRegion {
    pub contour: Contour,
    pub category: Category,
    pub area: f64,
    /// Vertex count of the approximated polygon, for pothole candidates.
    pub vertices: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct PotholeResult {
    /// Filled accepted candidates, before cleanup.
    pub fill: Mask,
    /// `fill` after erosion; this is the published pothole mask.
    pub mask: Mask,
    pub regions: Vec<ClassifiedRegion>,
}

/// Potholes are the large closed edge loops whose outline needs many
/// polygon vertices; lane paint outlines simplify to few.
#[derive(Debug, Clone)]
pub struct PotholeDetector {
    pub canny_low: f32,
    pub canny_high: f32,
    pub edge_dilation_kernel: usize,
    pub max_candidates: usize,
    pub approx_epsilon: f64,
    pub min_vertices: usize,
    pub erosion_kernel: usize,
}

impl PotholeDetector {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            canny_low: config.canny_low,
            canny_high: config.canny_high,
            edge_dilation_kernel: config.edge_dilation_kernel,
            max_candidates: config.max_candidates,
            approx_epsilon: config.approx_epsilon,
            min_vertices: config.min_vertices,
            erosion_kernel: config.erosion_kernel,
        }
    }

    /// Number of vertices of the simplified outline.
    pub fn vertex_count(&self, contour: &Contour) -> usize {
        let epsilon = self.approx_epsilon * contour.perimeter();
        contour.approx_polygon(epsilon).len()
    }

    pub fn classify(&self, contour: &Contour) -> ClassifiedRegion {
        let area = contour.area();
        if contour.is_degenerate() {
            return ClassifiedRegion {
                contour: contour.clone(),
                category: Category::Discarded,
                area,
                vertices: None,
            };
        }
        let vertices = self.vertex_count(contour);
        let category = if vertices >= self.min_vertices {
            Category::Pothole
        } else {
            Category::Discarded
        };
        ClassifiedRegion {
            contour: contour.clone(),
            category,
            area,
            vertices: Some(vertices),
        }
    }

    pub fn detect(&self, blurred: &ColorImage, diagnostics: &mut dyn Diagnostics) -> PotholeResult {
        let edges = canny(blurred, self.canny_low, self.canny_high);
        diagnostics.mask(Stage::Edges, &edges);
        diagnostics.mask(Stage::DilatedEdges, &dilate(&edges, self.edge_dilation_kernel));

        let mut candidates = find_contours(&edges, Retrieval::External);
        // stable, so equal areas keep tracing order
        candidates.sort_by(|a, b| b.area().total_cmp(&a.area()));
        candidates.truncate(self.max_candidates);
        diagnostics.contours(Stage::PotholeCandidates, &candidates);

        let regions: Vec<ClassifiedRegion> =
            candidates.iter().map(|c| self.classify(c)).collect();
        for region in regions.iter().filter(|r| r.category == Category::Pothole) {
            log::info!(
                "pothole found: area {:.0}, {} vertices",
                region.area,
                region.vertices.unwrap_or(0)
            );
        }

        let fill = fill_contours(
            blurred.size,
            regions
                .iter()
                .filter(|r| r.category == Category::Pothole)
                .map(|r| &r.contour),
        );
        let mask = erode(&fill, self.erosion_kernel);
        diagnostics.mask(Stage::PotholeFill, &fill);
        diagnostics.mask(Stage::Potholes, &mask);

        PotholeResult {
            fill,
            mask,
            regions,
        }
    }
}
