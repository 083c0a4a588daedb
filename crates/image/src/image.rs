use {crate::*, base::{Grid, Vec2}};

/// 16-bit depth in device units, zero meaning "no reading".
pub type DepthImage = Grid<u16>;

/// Single-channel 8-bit intensity.
pub type GrayImage = Grid<u8>;

/// Interleaved 3-channel 8-bit color frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorImage {
    pub size: Vec2<usize>,
    pub data: Vec<u8>,
    pub format: PixelFormat,
}

impl ColorImage {
    pub fn new(size: Vec2<usize>, data: Vec<u8>, format: PixelFormat) -> Result<Self, ImageError> {
        let expected = size
            .x
            .checked_mul(size.y)
            .and_then(|n| n.checked_mul(3))
            .ok_or(ImageError::Grid(base::GridError::SizeOverflow))?;
        if data.len() != expected {
            return Err(ImageError::Grid(base::GridError::SizeMismatch {
                expected,
                got: data.len(),
            }));
        }
        Ok(Self { size, data, format })
    }

    /// An all-black frame.
    pub fn black(size: Vec2<usize>, format: PixelFormat) -> Self {
        Self {
            size,
            data: vec![0; size.count() * 3],
            format,
        }
    }

    pub fn width(&self) -> usize {
        self.size.x
    }

    pub fn height(&self) -> usize {
        self.size.y
    }

    /// Stored sample at `(x, y)`, in this frame's channel order.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.size.x + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, px: [u8; 3]) {
        let i = (y * self.size.x + x) * 3;
        self.data[i..i + 3].copy_from_slice(&px);
    }

    /// Sample at `(x, y)` as `(r, g, b)` regardless of channel order.
    #[inline]
    pub fn rgb(&self, x: usize, y: usize) -> (u8, u8, u8) {
        self.format.to_rgb(self.pixel(x, y))
    }

    /// Zero every pixel where `mask` is clear.
    pub fn masked(&self, mask: &Mask) -> ColorImage {
        assert_eq!(self.size, mask.size, "mask does not match frame size");
        let mut data = self.data.clone();
        for (px, &keep) in data.chunks_exact_mut(3).zip(mask.data.iter()) {
            if !keep {
                px.fill(0);
            }
        }
        ColorImage {
            size: self.size,
            data,
            format: self.format,
        }
    }
}
