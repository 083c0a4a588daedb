//! Frame containers for the roadscan pipeline.
//!
//! Color frames are interleaved 3-channel `u8` with an explicit channel
//! order, depth frames are `u16` device units, and masks are one `bool` per
//! pixel. All rasters are row-major and share `base::Grid` for layout.

mod buffer;
pub use buffer::*;

mod codec;
pub use codec::*;

mod convert;
pub use convert::*;

mod error;
pub use error::*;

mod image;
pub use image::*;

mod mask;
pub use mask::*;

mod pixelformat;
pub use pixelformat::*;
