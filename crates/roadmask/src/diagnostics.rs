use {crate::Contour, image::Mask};

/// Intermediate results a pipeline run can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Surface,
    Foreground,
    Background,
    Everything,
    Edges,
    DilatedEdges,
    PotholeCandidates,
    PotholeFill,
    Potholes,
    Xor,
    ErodedXor,
    LaneContours,
    Lanes,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Surface => "surface",
            Stage::Foreground => "foreground",
            Stage::Background => "background",
            Stage::Everything => "everything",
            Stage::Edges => "edges",
            Stage::DilatedEdges => "dilated_edges",
            Stage::PotholeCandidates => "pothole_candidates",
            Stage::PotholeFill => "pothole_fill",
            Stage::Potholes => "potholes",
            Stage::Xor => "xor",
            Stage::ErodedXor => "eroded_xor",
            Stage::LaneContours => "lane_contours",
            Stage::Lanes => "lanes",
        }
    }
}

/// Sink for intermediate masks and contour sets.
///
/// Both methods default to doing nothing, so a sink only implements what it
/// records.
pub trait Diagnostics {
    fn mask(&mut self, _stage: Stage, _mask: &Mask) {}
    fn contours(&mut self, _stage: Stage, _contours: &[Contour]) {}
}

pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {}
