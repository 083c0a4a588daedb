use {
    crate::*,
    base::Vec2,
    roadmask::{ConfigError, PipelineConfig},
    serde::{Deserialize, Serialize},
    std::{fs, path::Path, time::Duration},
};

/// Names under which messages are received and published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channels {
    pub color: String,
    pub depth: String,
    pub camera_info: String,
    pub pothole_depth: String,
    pub lane_depth: String,
    pub output_info: String,
}

impl Default for Channels {
    fn default() -> Self {
        Self {
            color: "/camera/color/image_raw".to_string(),
            depth: "/camera/depth/image_rect_raw".to_string(),
            camera_info: "/camera/depth/camera_info".to_string(),
            pothole_depth: "pothole_depth".to_string(),
            lane_depth: "lane_depth".to_string(),
            output_info: "/cov_info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// Resolution every input frame must have.
    pub frame_size: Vec2<usize>,
    /// Seconds between republished outputs.
    pub output_period: f64,
    /// Frame of reference stamped on every output.
    pub frame_id: String,
    pub channels: Channels,
    pub pipeline: PipelineConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            frame_size: Vec2::new(1280, 720),
            output_period: 0.1,
            frame_id: "camera_link".to_string(),
            channels: Channels::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Read a JSON configuration file. Fields it leaves out keep their
    /// defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NodeError> {
        let text = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.frame_size.x == 0 || self.frame_size.y == 0 {
            return Err(ConfigError::Invalid(format!(
                "frame size {}x{} is empty",
                self.frame_size.x, self.frame_size.y
            )));
        }
        if !(self.output_period > 0.0 && self.output_period.is_finite()) {
            return Err(ConfigError::Invalid(format!(
                "output period must be positive, got {}",
                self.output_period
            )));
        }
        self.pipeline.validate(self.frame_size)
    }

    pub fn output_period(&self) -> Duration {
        Duration::from_secs_f64(self.output_period)
    }
}
