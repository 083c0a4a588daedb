use base::{Grid, Vec2};
use image::{
    ColorImage, ImageError, Mask, PixelFormat, decode_color_png, decode_depth_png,
    encode_color_png, encode_depth_png, encode_mask_png,
};

#[test]
fn test_depth_png_is_lossless() {
    let depth = Grid::new(Vec2::new(3, 2), vec![0u16, 1, 255, 256, 4097, 65535]).unwrap();
    let png = encode_depth_png(&depth).unwrap();
    assert_eq!(&png[1..4], b"PNG");
    assert_eq!(decode_depth_png(&png).unwrap(), depth);
}

#[test]
fn test_color_png_normalizes_to_rgb() {
    let bgr = ColorImage::new(Vec2::new(1, 1), vec![1, 2, 3], PixelFormat::Bgr8).unwrap();
    let decoded = decode_color_png(&encode_color_png(&bgr).unwrap()).unwrap();
    assert_eq!(decoded.format, PixelFormat::Rgb8);
    assert_eq!(decoded.data, vec![3, 2, 1]);
}

#[test]
fn test_depth_rejects_8bit_png() {
    let mask: Mask = Grid::new(Vec2::new(2, 1), vec![true, false]).unwrap();
    let png = encode_mask_png(&mask).unwrap();
    assert!(matches!(decode_depth_png(&png), Err(ImageError::Format(_))));
}

#[test]
fn test_corrupt_data_is_decode_error() {
    assert!(matches!(
        decode_color_png(b"not a png"),
        Err(ImageError::Decode(_))
    ));
}
