use {image::ImageError, roadmask::ConfigError, sensor::SensorError, std::fmt};

#[derive(Debug)]
pub enum NodeError {
    Config(ConfigError),
    Sensor(SensorError),
    Image(ImageError),
    Io(std::io::Error),
    Json(serde_json::Error),
    Publish(String),
    Task(String),
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeError::Config(err) => write!(f, "config error: {err}"),
            NodeError::Sensor(err) => write!(f, "sensor error: {err}"),
            NodeError::Image(err) => write!(f, "image error: {err}"),
            NodeError::Io(err) => write!(f, "I/O error: {err}"),
            NodeError::Json(err) => write!(f, "JSON error: {err}"),
            NodeError::Publish(msg) => write!(f, "publish error: {msg}"),
            NodeError::Task(msg) => write!(f, "task error: {msg}"),
        }
    }
}

impl std::error::Error for NodeError {}

impl From<ConfigError> for NodeError {
    fn from(err: ConfigError) -> Self {
        NodeError::Config(err)
    }
}

impl From<SensorError> for NodeError {
    fn from(err: SensorError) -> Self {
        NodeError::Sensor(err)
    }
}

impl From<ImageError> for NodeError {
    fn from(err: ImageError) -> Self {
        NodeError::Image(err)
    }
}

impl From<std::io::Error> for NodeError {
    fn from(err: std::io::Error) -> Self {
        NodeError::Io(err)
    }
}

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        NodeError::Json(err)
    }
}

impl From<tokio::task::JoinError> for NodeError {
    fn from(err: tokio::task::JoinError) -> Self {
        NodeError::Task(err.to_string())
    }
}
