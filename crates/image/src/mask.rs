use base::{Grid, Rect, Vec2};

/// One label per pixel; `true` is foreground.
pub type Mask = Grid<bool>;

/// Set algebra and inspection on binary masks.
///
/// Binary operations require both masks to have the same size.
pub trait MaskOps {
    fn clear(size: Vec2<usize>) -> Self;
    fn from_rect(size: Vec2<usize>, rect: Rect<usize>) -> Self;
    fn xor(&self, other: &Self) -> Self;
    /// Pixels set in `self` but not in `other`.
    fn and_not(&self, other: &Self) -> Self;
    fn count(&self) -> usize;
    fn is_clear(&self) -> bool;
    fn is_disjoint(&self, other: &Self) -> bool;
    /// Mask value scaled to the 8-bit convention (0 or 255).
    fn to_gray(&self) -> Grid<u8>;
}

impl MaskOps for Mask {
    fn clear(size: Vec2<usize>) -> Self {
        Grid {
            size,
            data: vec![false; size.count()],
        }
    }

    fn from_rect(size: Vec2<usize>, rect: Rect<usize>) -> Self {
        let mut mask = Self::clear(size);
        if let Some(rect) = Rect::covering(size).intersection(rect) {
            let max = rect.max();
            for y in rect.origin.y..max.y {
                mask.row_mut(y)[rect.origin.x..max.x].fill(true);
            }
        }
        mask
    }

    fn xor(&self, other: &Self) -> Self {
        self.zip_map(other, |&a, &b| a ^ b)
    }

    fn and_not(&self, other: &Self) -> Self {
        self.zip_map(other, |&a, &b| a && !b)
    }

    fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    fn is_clear(&self) -> bool {
        !self.data.iter().any(|&v| v)
    }

    fn is_disjoint(&self, other: &Self) -> bool {
        assert_eq!(self.size, other.size, "masks of different size");
        !self.data.iter().zip(other.data.iter()).any(|(&a, &b)| a && b)
    }

    fn to_gray(&self) -> Grid<u8> {
        self.map(|&v| if v { 255 } else { 0 })
    }
}
