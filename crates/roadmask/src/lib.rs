//! Road surface classification.
//!
//! Turns one color frame and its aligned depth frame into two disjoint masks,
//! potholes and lane markings, plus the depth restricted to each. Every stage
//! is a plain function of its inputs and the `PipelineConfig`; there is no
//! state carried between frames.
//!
//! The image primitives follow the usual 8-bit conventions (hue in 0..=179,
//! reflect-101 borders for blurring, replicate borders for gradients) so that
//! tuned thresholds carry over from other tooling.

mod canny;
pub use canny::*;

mod config;
pub use config::*;

mod contour;
pub use contour::*;

mod diagnostics;
pub use diagnostics::*;

mod error;
pub use error::*;

mod filter;
pub use filter::*;

mod lane;
pub use lane::*;

mod morphology;
pub use morphology::*;

mod normalize;
pub use normalize::*;

mod pipeline;
pub use pipeline::*;

mod pothole;
pub use pothole::*;

mod project;
pub use project::*;

mod segment;
pub use segment::*;

mod threshold;
pub use threshold::*;
