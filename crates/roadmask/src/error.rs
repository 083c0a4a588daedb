use {base::Rect, base::Vec2, std::fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Kernel sizes must be odd and non-zero.
    Kernel { name: &'static str, size: usize },
    /// Lower bound above upper bound, or a negative bound.
    Range { name: &'static str },
    Hue(u8),
    Roi { roi: Rect<usize>, frame: Vec2<usize> },
    Tolerance(f64),
    Candidates,
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Kernel { name, size } => {
                write!(f, "{name} kernel must be odd and non-zero, got {size}")
            }
            ConfigError::Range { name } => write!(f, "{name} range is inverted or negative"),
            ConfigError::Hue(hue) => write!(f, "hue {hue} is outside 0..=179"),
            ConfigError::Roi { roi, frame } => write!(
                f,
                "ROI {:?}+{:?} does not fit a {}x{} frame",
                roi.origin, roi.size, frame.x, frame.y
            ),
            ConfigError::Tolerance(value) => {
                write!(f, "approximation tolerance must be positive, got {value}")
            }
            ConfigError::Candidates => write!(f, "candidate count must be at least 1"),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    SizeMismatch {
        expected: Vec2<usize>,
        got: Vec2<usize>,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameError::SizeMismatch { expected, got } => write!(
                f,
                "frame is {}x{}, expected {}x{}",
                got.x, got.y, expected.x, expected.y
            ),
        }
    }
}

impl std::error::Error for FrameError {}
