use {crate::*, base::Grid};

/// Convert one sample to 8-bit HSV.
///
/// Hue is halved to fit a byte (`0..=179`), saturation and value span
/// `0..=255`. Gray samples get hue 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = (v - min) as f32;
    let s = if v == 0 {
        0.0
    } else {
        255.0 * diff / v as f32
    };
    let h = if diff == 0.0 {
        0.0
    } else if v == r {
        30.0 * (gf - bf) / diff
    } else if v == g {
        60.0 + 30.0 * (bf - rf) / diff
    } else {
        120.0 + 30.0 * (rf - gf) / diff
    };
    let h = if h < 0.0 { h + 180.0 } else { h };
    let h = (h.round() as u32 % 180) as u8;
    [h, s.round() as u8, v]
}

/// BT.601 luma of one sample.
#[inline]
pub fn rgb_to_luma(r: u8, g: u8, b: u8) -> u8 {
    (0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32).round() as u8
}

/// Single-channel intensity of a color frame.
pub fn to_gray(image: &ColorImage) -> GrayImage {
    Grid {
        size: image.size,
        data: image
            .data
            .chunks_exact(3)
            .map(|px| {
                let (r, g, b) = image.format.to_rgb([px[0], px[1], px[2]]);
                rgb_to_luma(r, g, b)
            })
            .collect(),
    }
}
