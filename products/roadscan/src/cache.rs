use {
    base::{Epoch, Vec2},
    image::DepthImage,
    sensor::Intrinsics,
    std::sync::{Arc, Mutex},
};

/// One completed cycle, as republished.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Zero until the first cycle completes.
    pub epoch: u64,
    pub pothole_depth: Arc<DepthImage>,
    pub lane_depth: Arc<DepthImage>,
    pub intrinsics: Arc<Intrinsics>,
}

/// Latest outputs, replaced wholesale once per cycle.
///
/// Readers get an `Arc` to an immutable snapshot and never block the writer
/// for longer than a pointer swap.
pub struct OutputCache {
    epoch: Epoch,
    snapshot: Mutex<Arc<Snapshot>>,
}

impl OutputCache {
    pub fn new(size: Vec2<usize>) -> Self {
        let zeros = Arc::new(DepthImage {
            size,
            data: vec![0; size.count()],
        });
        Self {
            epoch: Epoch::new(),
            snapshot: Mutex::new(Arc::new(Snapshot {
                epoch: 0,
                pothole_depth: Arc::clone(&zeros),
                lane_depth: zeros,
                intrinsics: Arc::new(Intrinsics::default()),
            })),
        }
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Publish a completed cycle. Returns its epoch.
    pub fn store(
        &self,
        pothole_depth: DepthImage,
        lane_depth: DepthImage,
        intrinsics: Arc<Intrinsics>,
    ) -> u64 {
        let mut snapshot = self.snapshot.lock().unwrap_or_else(|e| e.into_inner());
        let epoch = self.epoch.advance();
        *snapshot = Arc::new(Snapshot {
            epoch,
            pothole_depth: Arc::new(pothole_depth),
            lane_depth: Arc::new(lane_depth),
            intrinsics,
        });
        epoch
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.current()
    }
}
