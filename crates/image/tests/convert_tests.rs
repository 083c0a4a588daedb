use base::Vec2;
use image::{ColorImage, PixelFormat, rgb_to_hsv, rgb_to_luma, to_gray};

#[test]
fn test_hsv_primaries() {
    assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
    assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
    assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
    assert_eq!(rgb_to_hsv(255, 255, 0), [30, 255, 255]);
}

#[test]
fn test_hsv_grays_have_no_saturation() {
    assert_eq!(rgb_to_hsv(255, 255, 255), [0, 0, 255]);
    assert_eq!(rgb_to_hsv(153, 153, 153), [0, 0, 153]);
    assert_eq!(rgb_to_hsv(0, 0, 0), [0, 0, 0]);
}

#[test]
fn test_hsv_slightly_tinted_white() {
    // 255 * 30 / 230 = 33.26
    assert_eq!(rgb_to_hsv(200, 200, 230), [120, 33, 230]);
}

#[test]
fn test_hue_wraps_below_zero() {
    // magenta-ish red: v == r, g < b
    let [h, _, _] = rgb_to_hsv(255, 0, 10);
    assert!(h >= 178, "hue {h}");
}

#[test]
fn test_luma_weights() {
    assert_eq!(rgb_to_luma(255, 255, 255), 255);
    assert_eq!(rgb_to_luma(255, 0, 0), 76);
    assert_eq!(rgb_to_luma(0, 0, 255), 29);
}

#[test]
fn test_frame_conversions_follow_format() {
    let bgr = ColorImage::new(Vec2::new(1, 1), vec![0, 0, 255], PixelFormat::Bgr8).unwrap();
    assert_eq!(to_gray(&bgr).get(0, 0), 76);
}
