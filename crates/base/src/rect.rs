use {
    crate::Vec2,
    serde::{Deserialize, Serialize},
    std::ops::{Add, Mul, Sub},
};

/// Axis-aligned rectangle; `origin` inclusive, `origin + size` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T: Default> Default for Rect<T> {
    fn default() -> Self {
        Self {
            origin: Vec2::zero(),
            size: Vec2::zero(),
        }
    }
}

impl<T> Rect<T> {
    pub const fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: Add<Output = T> + Copy> Rect<T> {
    pub fn max(&self) -> Vec2<T> {
        self.origin + self.size
    }
}

impl<T: Mul<Output = T> + Copy> Rect<T> {
    pub fn area(&self) -> T {
        self.size.x * self.size.y
    }
}

impl<T: Sub<Output = T> + Copy> Rect<T> {
    pub fn from_min_max(min: Vec2<T>, max: Vec2<T>) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }
}

impl<T: Add<Output = T> + PartialOrd + Copy> Rect<T> {
    pub fn contains_point(&self, point: Vec2<T>) -> bool {
        let max = self.max();
        point.x >= self.origin.x && point.y >= self.origin.y && point.x < max.x && point.y < max.y
    }

    pub fn contains_rect(&self, other: Rect<T>) -> bool {
        let self_max = self.max();
        let other_max = other.max();
        other.origin.x >= self.origin.x
            && other.origin.y >= self.origin.y
            && other_max.x <= self_max.x
            && other_max.y <= self_max.y
    }
}

impl<T: Add<Output = T> + Sub<Output = T> + PartialOrd + Copy> Rect<T> {
    /// Overlap of two rectangles, `None` when they share no cell.
    pub fn intersection(&self, other: Rect<T>) -> Option<Rect<T>> {
        let self_max = self.max();
        let other_max = other.max();
        let min = Vec2::new(
            larger(self.origin.x, other.origin.x),
            larger(self.origin.y, other.origin.y),
        );
        let max = Vec2::new(
            smaller(self_max.x, other_max.x),
            smaller(self_max.y, other_max.y),
        );
        if min.x < max.x && min.y < max.y {
            Some(Rect::from_min_max(min, max))
        } else {
            None
        }
    }
}

impl Rect<usize> {
    /// The rectangle covering a whole raster of `size`.
    pub fn covering(size: Vec2<usize>) -> Self {
        Self::new(Vec2::zero(), size)
    }
}

fn larger<T: PartialOrd>(a: T, b: T) -> T {
    if a > b { a } else { b }
}

fn smaller<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { a } else { b }
}
