use {
    base::{Grid, Stamped, Vec2},
    image::{ColorImage, PixelFormat},
    roadscan::FrameBuffer,
    sensor::Intrinsics,
};

const SIZE: Vec2<usize> = Vec2::new(8, 6);

fn color(sequence: u64, size: Vec2<usize>) -> Stamped<ColorImage> {
    Stamped::now(sequence, ColorImage::black(size, PixelFormat::Bgr8))
}

#[test]
fn test_starts_with_zero_depth() {
    let frames = FrameBuffer::new(SIZE);
    let inputs = frames.inputs();
    assert_eq!(inputs.depth.size, SIZE);
    assert!(inputs.depth.data.iter().all(|&d| d == 0));
    assert_eq!(*inputs.intrinsics, Intrinsics::default());
}

#[test]
fn test_mismatched_frames_keep_previous_state() {
    let frames = FrameBuffer::new(SIZE);
    frames
        .update_depth(Stamped::now(1, Grid::filled(SIZE, 7u16).unwrap()))
        .unwrap();
    assert!(
        frames
            .update_depth(Stamped::now(2, Grid::filled(Vec2::new(4, 4), 9u16).unwrap()))
            .is_err()
    );
    assert_eq!(frames.inputs().depth.get(0, 0), 7);

    let mut receiver = frames.subscribe();
    assert!(frames.update_color(color(3, Vec2::new(2, 2))).is_err());
    assert!(!receiver.has_changed().unwrap());
}

#[test]
fn test_only_newest_color_is_kept() {
    let frames = FrameBuffer::new(SIZE);
    let mut receiver = frames.subscribe();
    for sequence in 1..=3 {
        frames.update_color(color(sequence, SIZE)).unwrap();
    }
    assert!(receiver.has_changed().unwrap());
    let taken = frames.take_color(&mut receiver).unwrap();
    assert_eq!(taken.epoch, 3);
    assert_eq!(frames.dropped(), 2);

    frames.update_color(color(4, SIZE)).unwrap();
    assert_eq!(frames.take_color(&mut receiver).unwrap().epoch, 4);
    assert_eq!(frames.dropped(), 2);
}

#[test]
fn test_intrinsics_replace_wholesale() {
    let frames = FrameBuffer::new(SIZE);
    let before = frames.inputs();
    frames.update_intrinsics(Intrinsics {
        width: 8,
        height: 6,
        ..Default::default()
    });
    assert_eq!(before.intrinsics.width, 0);
    assert_eq!(frames.inputs().intrinsics.width, 8);
}

#[tokio::test]
async fn test_close_ends_subscription_after_last_frame() {
    let frames = FrameBuffer::new(SIZE);
    let mut receiver = frames.subscribe();
    frames.update_color(color(1, SIZE)).unwrap();
    frames.close();
    assert!(receiver.changed().await.is_ok());
    assert_eq!(frames.take_color(&mut receiver).unwrap().epoch, 1);
    assert!(receiver.changed().await.is_err());
    // later frames are ignored
    frames.update_color(color(2, SIZE)).unwrap();
}
