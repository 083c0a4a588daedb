use {
    crate::*,
    image::{DepthImage, Mask, encode_depth_png, encode_mask_png},
    roadmask::{Contour, Diagnostics, Stage},
    sensor::Intrinsics,
    serde::Serialize,
    std::{
        fs,
        path::{Path, PathBuf},
        sync::Arc,
        time::{SystemTime, UNIX_EPOCH},
    },
    tokio::sync::mpsc,
};

#[derive(Debug, Clone)]
pub enum Payload {
    Depth(Arc<DepthImage>),
    Intrinsics(Arc<Intrinsics>),
}

/// One outgoing message.
#[derive(Debug, Clone)]
pub struct Published {
    pub channel: String,
    pub frame_id: String,
    pub stamp: SystemTime,
    /// Cycle the payload came from; zero before the first cycle.
    pub epoch: u64,
    pub payload: Payload,
}

/// Where republished outputs go.
pub trait Publisher: Send + 'static {
    fn publish(&mut self, message: Published) -> Result<(), NodeError>;
}

/// Hands messages to an in-process consumer.
///
/// A full channel drops the message; a consumer that has gone away ends
/// publishing.
pub struct ChannelPublisher {
    sender: mpsc::Sender<Published>,
}

impl ChannelPublisher {
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Published>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

impl Publisher for ChannelPublisher {
    fn publish(&mut self, message: Published) -> Result<(), NodeError> {
        match self.sender.try_send(message) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(message)) => {
                log::debug!("consumer busy, dropping {}", message.channel);
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                Err(NodeError::Publish("consumer closed the channel".to_string()))
            }
        }
    }
}

fn file_stem(channel: &str) -> String {
    channel.trim_start_matches('/').replace('/', "_")
}

// write through a temporary file so readers never see a partial image
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), NodeError> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[derive(Serialize)]
struct StampedIntrinsics<'a> {
    frame_id: &'a str,
    stamp: f64,
    epoch: u64,
    intrinsics: &'a Intrinsics,
}

/// Keeps the latest output of every channel on disk: depth as 16-bit PNG,
/// intrinsics as JSON.
pub struct PngPublisher {
    dir: PathBuf,
}

impl PngPublisher {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, NodeError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn path(&self, channel: &str, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", file_stem(channel), extension))
    }
}

impl Publisher for PngPublisher {
    fn publish(&mut self, message: Published) -> Result<(), NodeError> {
        match &message.payload {
            Payload::Depth(depth) => {
                write_atomic(&self.path(&message.channel, "png"), &encode_depth_png(depth)?)
            }
            Payload::Intrinsics(intrinsics) => {
                let stamp = message
                    .stamp
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs_f64())
                    .unwrap_or(0.0);
                let json = serde_json::to_vec_pretty(&StampedIntrinsics {
                    frame_id: &message.frame_id,
                    stamp,
                    epoch: message.epoch,
                    intrinsics,
                })?;
                write_atomic(&self.path(&message.channel, "json"), &json)
            }
        }
    }
}

/// Writes every intermediate mask of every cycle as `<cycle>_<stage>.png`.
///
/// A new cycle starts with each surface mask.
pub struct PngDiagnostics {
    dir: PathBuf,
    cycle: u64,
}

impl PngDiagnostics {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, NodeError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, cycle: 0 })
    }
}

impl Diagnostics for PngDiagnostics {
    fn mask(&mut self, stage: Stage, mask: &Mask) {
        if stage == Stage::Surface {
            self.cycle += 1;
        }
        let path = self.dir.join(format!("{:06}_{}.png", self.cycle, stage.name()));
        let result = encode_mask_png(mask)
            .map_err(NodeError::from)
            .and_then(|png| write_atomic(&path, &png));
        if let Err(error) = result {
            log::warn!("cannot write {}: {}", path.display(), error);
        }
    }

    fn contours(&mut self, stage: Stage, contours: &[Contour]) {
        log::debug!("{}: {} contours", stage.name(), contours.len());
    }
}
