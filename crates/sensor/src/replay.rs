use {
    crate::*,
    base::{Stamped, Vec2},
    image::{ColorImage, PixelFormat, decode_color_png, decode_depth_png},
    std::{
        collections::VecDeque,
        fs,
        path::{Path, PathBuf},
        time::Duration,
    },
};

const COLOR_PREFIX: &str = "color_";
const DEPTH_PREFIX: &str = "depth_";
const INTRINSICS_FILE: &str = "camera_info.json";

#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Directory holding `color_<name>.png`, optional `depth_<name>.png` and
    /// optional `camera_info.json`.
    pub dir: PathBuf,
    /// Color frames per second; zero replays as fast as possible.
    pub frame_rate: f32,
    /// Start over after the last frame instead of reporting exhaustion.
    pub looping: bool,
}

impl ReplayConfig {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            frame_rate: 30.0,
            looping: false,
        }
    }
}

fn read_color(path: &Path) -> Result<ColorImage, SensorError> {
    Ok(decode_color_png(&fs::read(path)?)?)
}

struct ReplayEntry {
    color: PathBuf,
    depth: Option<PathBuf>,
}

/// Plays back recorded frames from a directory.
///
/// Frames are replayed in file name order. For every entry the depth frame
/// (if recorded) is emitted before the color frame, so a consumer that
/// processes on color arrival always sees the matching depth.
pub struct ReplayDevice {
    config: ReplayConfig,
    entries: Vec<ReplayEntry>,
    cursor: usize,
    sequence: u64,
    pending: VecDeque<SensorMessage>,
}

impl ReplayDevice {
    pub fn new(config: ReplayConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            cursor: 0,
            sequence: 0,
            pending: VecDeque::new(),
        }
    }

    fn scan(dir: &Path) -> Result<Vec<ReplayEntry>, SensorError> {
        let mut names: Vec<String> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| name.starts_with(COLOR_PREFIX) && name.ends_with(".png"))
            .collect();
        names.sort();
        Ok(names
            .into_iter()
            .map(|name| {
                let depth = dir.join(format!("{DEPTH_PREFIX}{}", &name[COLOR_PREFIX.len()..]));
                ReplayEntry {
                    color: dir.join(&name),
                    depth: depth.is_file().then_some(depth),
                }
            })
            .collect())
    }

    // Decode the entry at the cursor and queue its messages. The cursor moves
    // on even when decoding fails.
    fn load_entry(&mut self) -> Result<(), SensorError> {
        let entry = &self.entries[self.cursor];
        self.cursor += 1;
        let depth = match &entry.depth {
            Some(path) => Some(decode_depth_png(&fs::read(path)?)?),
            None => None,
        };
        let color = read_color(&entry.color)?;

        self.sequence += 1;
        if let Some(depth) = depth {
            self.pending
                .push_back(SensorMessage::Depth(Stamped::now(self.sequence, depth)));
        }
        self.pending
            .push_back(SensorMessage::Color(Stamped::now(self.sequence, color)));
        Ok(())
    }

    // Size of the first color frame that decodes.
    fn first_size(&self) -> Result<Vec2<usize>, SensorError> {
        for entry in &self.entries {
            match read_color(&entry.color) {
                Ok(color) => return Ok(color.size),
                Err(error) => log::warn!("replay: skipping {}: {}", entry.color.display(), error),
            }
        }
        Err(SensorError::Device(format!(
            "no readable {COLOR_PREFIX}*.png frames in {}",
            self.config.dir.display()
        )))
    }
}

impl SensorDevice for ReplayDevice {
    fn open(&mut self) -> Result<SensorInfo, SensorError> {
        self.entries = Self::scan(&self.config.dir)?;
        // a reopen after a capture failure resumes where playback stopped
        self.cursor = self.cursor.min(self.entries.len());
        self.pending.clear();
        if self.entries.is_empty() {
            return Err(SensorError::Device(format!(
                "no {COLOR_PREFIX}*.png frames in {}",
                self.config.dir.display()
            )));
        }
        let size = self.first_size()?;

        let intrinsics_path = self.config.dir.join(INTRINSICS_FILE);
        if intrinsics_path.is_file() {
            let intrinsics: Intrinsics = serde_json::from_slice(&fs::read(&intrinsics_path)?)?;
            self.pending.push_back(SensorMessage::Info(intrinsics));
        }

        log::info!(
            "replay: {} frames of {}x{} from {}",
            self.entries.len(),
            size.x,
            size.y,
            self.config.dir.display()
        );
        Ok(SensorInfo {
            size,
            format: PixelFormat::Rgb8,
            frame_rate: self.config.frame_rate,
        })
    }

    fn close(&mut self) {
        self.pending.clear();
    }

    fn blocking_capture(&mut self) -> Result<SensorMessage, SensorError> {
        let mut skipped = 0;
        while self.pending.is_empty() {
            if self.cursor >= self.entries.len() {
                if !self.config.looping || self.entries.is_empty() {
                    return Err(SensorError::Exhausted);
                }
                self.cursor = 0;
            }
            let path = self.entries[self.cursor].color.clone();
            if let Err(error) = self.load_entry() {
                // skip it here; a capture error would reopen and start over
                log::warn!("replay: skipping {}: {}", path.display(), error);
                skipped += 1;
                if skipped >= self.entries.len() {
                    log::error!("replay: no entry in {} decodes", self.config.dir.display());
                    return Err(SensorError::Exhausted);
                }
            }
        }
        let message = self.pending.pop_front().ok_or(SensorError::Exhausted)?;
        if matches!(message, SensorMessage::Color(_)) && self.config.frame_rate > 0.0 {
            std::thread::sleep(Duration::from_secs_f32(1.0 / self.config.frame_rate));
        }
        Ok(message)
    }
}
