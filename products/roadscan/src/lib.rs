//! The roadscan node.
//!
//! Receives color, depth and calibration from a sensor, classifies every
//! color frame into pothole and lane masks, and republishes the masked depth
//! on a fixed timer.

mod cache;
pub use cache::*;

mod config;
pub use config::*;

mod error;
pub use error::*;

mod framebuffer;
pub use framebuffer::*;

mod node;
pub use node::*;

mod publish;
pub use publish::*;
