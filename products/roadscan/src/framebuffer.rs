use {
    base::Vec2,
    image::DepthImage,
    roadmask::FrameError,
    sensor::{ColorFrame, DepthFrame, Intrinsics},
    std::sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    tokio::sync::watch,
};

pub type ColorSlot = Option<Arc<ColorFrame>>;

/// Depth and calibration a cycle runs against.
#[derive(Debug, Clone)]
pub struct Inputs {
    pub depth: Arc<DepthImage>,
    pub intrinsics: Arc<Intrinsics>,
}

/// Latest input from the sensor.
///
/// Color frames go through a `watch` slot that only ever holds the newest
/// frame: a frame that arrives while the previous one was never taken
/// replaces it and is counted as dropped. Depth and intrinsics are swapped
/// together under one lock, so a cycle always sees a consistent pair.
pub struct FrameBuffer {
    size: Vec2<usize>,
    color_tx: Mutex<Option<watch::Sender<ColorSlot>>>,
    color_rx: watch::Receiver<ColorSlot>,
    pending: AtomicBool,
    dropped: AtomicU64,
    inputs: Mutex<Inputs>,
}

impl FrameBuffer {
    /// Empty buffer; until the sensor delivers, depth is all zero and the
    /// intrinsics are default.
    pub fn new(size: Vec2<usize>) -> Self {
        let (color_tx, color_rx) = watch::channel(None);
        Self {
            size,
            color_tx: Mutex::new(Some(color_tx)),
            color_rx,
            pending: AtomicBool::new(false),
            dropped: AtomicU64::new(0),
            inputs: Mutex::new(Inputs {
                depth: Arc::new(DepthImage {
                    size,
                    data: vec![0; size.count()],
                }),
                intrinsics: Arc::new(Intrinsics::default()),
            }),
        }
    }

    pub fn size(&self) -> Vec2<usize> {
        self.size
    }

    fn check(&self, got: Vec2<usize>) -> Result<(), FrameError> {
        if got != self.size {
            return Err(FrameError::SizeMismatch {
                expected: self.size,
                got,
            });
        }
        Ok(())
    }

    pub fn update_color(&self, frame: ColorFrame) -> Result<(), FrameError> {
        self.check(frame.inner.size)?;
        let sequence = frame.epoch;
        let color_tx = self.color_tx.lock().unwrap_or_else(|e| e.into_inner());
        let Some(color_tx) = color_tx.as_ref() else {
            log::debug!("frame buffer closed, ignoring color frame {}", sequence);
            return Ok(());
        };
        if self.pending.swap(true, Ordering::AcqRel) {
            let dropped = self.dropped.fetch_add(1, Ordering::Relaxed) + 1;
            log::debug!(
                "color frame replaced before processing ({} dropped so far)",
                dropped
            );
        }
        color_tx.send_replace(Some(Arc::new(frame)));
        Ok(())
    }

    pub fn update_depth(&self, frame: DepthFrame) -> Result<(), FrameError> {
        self.check(frame.inner.size)?;
        let mut inputs = self.inputs.lock().unwrap_or_else(|e| e.into_inner());
        inputs.depth = Arc::new(frame.inner);
        Ok(())
    }

    pub fn update_intrinsics(&self, intrinsics: Intrinsics) {
        let mut inputs = self.inputs.lock().unwrap_or_else(|e| e.into_inner());
        inputs.intrinsics = Arc::new(intrinsics);
    }

    pub fn inputs(&self) -> Inputs {
        self.inputs.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Receiver that wakes on every new color frame.
    pub fn subscribe(&self) -> watch::Receiver<ColorSlot> {
        self.color_rx.clone()
    }

    /// Take the newest color frame from `receiver`, marking it processed.
    pub fn take_color(&self, receiver: &mut watch::Receiver<ColorSlot>) -> ColorSlot {
        self.pending.store(false, Ordering::Release);
        receiver.borrow_and_update().clone()
    }

    /// Color frames that were replaced before anyone took them.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Stop accepting color frames. Subscribers see the last frame, then the
    /// channel closes.
    pub fn close(&self) {
        self.color_tx.lock().unwrap_or_else(|e| e.into_inner()).take();
    }
}
