use std::fmt;

#[derive(Debug)]
pub enum SensorError {
    Device(String),
    Stream(String),
    Decode(image::ImageError),
    Config(String),
    /// The device has no more frames and will not produce any again.
    Exhausted,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorError::Device(msg) => write!(f, "device error: {msg}"),
            SensorError::Stream(msg) => write!(f, "stream error: {msg}"),
            SensorError::Decode(err) => write!(f, "decode error: {err}"),
            SensorError::Config(msg) => write!(f, "config error: {msg}"),
            SensorError::Exhausted => write!(f, "sensor exhausted"),
        }
    }
}

impl std::error::Error for SensorError {}

impl From<std::io::Error> for SensorError {
    fn from(err: std::io::Error) -> Self {
        SensorError::Device(err.to_string())
    }
}

impl From<image::ImageError> for SensorError {
    fn from(err: image::ImageError) -> Self {
        SensorError::Decode(err)
    }
}

impl From<serde_json::Error> for SensorError {
    fn from(err: serde_json::Error) -> Self {
        SensorError::Config(err.to_string())
    }
}
