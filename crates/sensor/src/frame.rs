use {
    base::{Rect, Stamped, Vec2},
    image::{ColorImage, DepthImage, PixelFormat},
    serde::{Deserialize, Serialize},
};

/// Color frame stamped with the device's capture sequence number and time.
pub type ColorFrame = Stamped<ColorImage>;

/// Depth frame stamped with the device's capture sequence number and time.
pub type DepthFrame = Stamped<DepthImage>;

/// Pinhole camera calibration as the driver reports it.
///
/// The node never interprets these values; they are cached and republished
/// next to the masked depth frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Intrinsics {
    pub width: u32,
    pub height: u32,
    pub distortion_model: String,
    pub d: Vec<f64>,
    pub k: [f64; 9],
    pub r: [f64; 9],
    pub p: [f64; 12],
    pub binning_x: u32,
    pub binning_y: u32,
    pub roi: Rect<u32>,
    pub do_rectify: bool,
}

impl Default for Intrinsics {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            distortion_model: String::new(),
            d: Vec::new(),
            k: [0.0; 9],
            r: [0.0; 9],
            p: [0.0; 12],
            binning_x: 0,
            binning_y: 0,
            roi: Rect::default(),
            do_rectify: false,
        }
    }
}

/// One item produced by a sensor.
#[derive(Debug, Clone)]
pub enum SensorMessage {
    Color(ColorFrame),
    Depth(DepthFrame),
    Info(Intrinsics),
}

/// What the device actually negotiated when it was opened.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorInfo {
    pub size: Vec2<usize>,
    pub format: PixelFormat,
    pub frame_rate: f32,
}
