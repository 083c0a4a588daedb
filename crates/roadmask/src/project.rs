use {
    image::{DepthImage, Mask},
    serde::{Deserialize, Serialize},
};

/// Which mask restricts the published lane depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaneDepthSource {
    /// The filtered lane mask.
    #[default]
    LaneMask,
    /// The unfiltered surface mask, as older deployments published it.
    EverythingMask,
}

/// Copy of `depth` with every sample outside `mask` set to 0.
pub fn project_depth(depth: &DepthImage, mask: &Mask) -> DepthImage {
    depth.zip_map(mask, |&d, &keep| if keep { d } else { 0 })
}
