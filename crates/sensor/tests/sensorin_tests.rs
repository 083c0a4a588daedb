use {
    base::{Stamped, Vec2},
    image::{ColorImage, PixelFormat},
    sensor::{SensorDevice, SensorError, SensorIn, SensorInfo, SensorMessage},
    std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

/// Fails the capture after every `burst` frames, then needs a reopen.
struct FlakyDevice {
    opens: Arc<AtomicUsize>,
    burst: usize,
    produced: usize,
    total: u64,
}

impl SensorDevice for FlakyDevice {
    fn open(&mut self) -> Result<SensorInfo, SensorError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        self.produced = 0;
        Ok(SensorInfo {
            size: Vec2::new(2, 2),
            format: PixelFormat::Bgr8,
            frame_rate: 0.0,
        })
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<SensorMessage, SensorError> {
        if self.produced == self.burst {
            return Err(SensorError::Device("cable pulled".to_string()));
        }
        self.produced += 1;
        self.total += 1;
        let image = ColorImage::black(Vec2::new(2, 2), PixelFormat::Bgr8);
        Ok(SensorMessage::Color(Stamped::now(self.total, image)))
    }
}

struct DeadDevice;

impl SensorDevice for DeadDevice {
    fn open(&mut self) -> Result<SensorInfo, SensorError> {
        Err(SensorError::Device("no such device".to_string()))
    }

    fn close(&mut self) {}

    fn blocking_capture(&mut self) -> Result<SensorMessage, SensorError> {
        Err(SensorError::Exhausted)
    }
}

#[tokio::test]
async fn test_sensorin_reconnects_after_failure() {
    let opens = Arc::new(AtomicUsize::new(0));
    let device = FlakyDevice {
        opens: Arc::clone(&opens),
        burst: 2,
        produced: 0,
        total: 0,
    };
    let mut sensorin = SensorIn::open(device).await.unwrap();
    assert_eq!(sensorin.info().format, PixelFormat::Bgr8);

    let mut sequence = Vec::new();
    for _ in 0..5 {
        match sensorin.capture().await.unwrap() {
            SensorMessage::Color(frame) => sequence.push(frame.epoch),
            other => panic!("unexpected {other:?}"),
        }
    }
    assert_eq!(sequence, vec![1, 2, 3, 4, 5]);
    assert!(opens.load(Ordering::SeqCst) >= 3);
}

#[tokio::test]
async fn test_sensorin_open_failure_is_reported() {
    let result = SensorIn::open(DeadDevice).await;
    assert!(matches!(result, Err(SensorError::Device(_))));
}
