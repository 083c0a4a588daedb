//! Sensor input for the roadscan node.
//!
//! A `SensorDevice` is a blocking source of color frames, depth frames and
//! camera intrinsics. `SensorIn` runs a device on a dedicated worker and hands
//! its messages to async code over a channel.

mod error;
pub use error::*;

mod frame;
pub use frame::*;

mod replay;
pub use replay::*;

mod sensorin;
pub use sensorin::*;
