use {
    base::{Grid, Vec2},
    image::{Luma, LumaBuffer, Mask, buffer_to_mask, mask_to_buffer},
    imageproc::{
        contours::BorderType,
        drawing::draw_polygon_mut,
        geometry::{approximate_polygon_dp, arc_length},
        point::Point,
    },
};

/// Which borders `find_contours` reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retrieval {
    /// Outer borders of top-level components only.
    External,
    /// Every outer and hole border, with parent links.
    Tree,
}

/// Closed border of a connected component, traced through pixel centers.
///
/// Runs of equal chain direction are collapsed to their end points.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub points: Vec<Vec2<i32>>,
    /// True for the border of a hole inside a component.
    pub is_hole: bool,
    /// Index of the enclosing contour in the same result set.
    pub parent: Option<usize>,
}

impl Contour {
    pub fn new(points: Vec<Vec2<i32>>) -> Self {
        Self {
            points,
            is_hole: false,
            parent: None,
        }
    }

    /// Enclosed area by the shoelace formula, always non-negative.
    pub fn area(&self) -> f64 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let twice: i64 = (0..n)
            .map(|i| {
                let a = self.points[i];
                let b = self.points[(i + 1) % n];
                a.x as i64 * b.y as i64 - b.x as i64 * a.y as i64
            })
            .sum();
        twice.abs() as f64 * 0.5
    }

    /// Length of the closed polyline.
    pub fn perimeter(&self) -> f64 {
        if self.points.len() < 2 {
            return 0.0;
        }
        arc_length(&to_points(&self.points), true)
    }

    /// Degenerate contours are skipped by every classifier.
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 3 || self.area() == 0.0
    }

    /// Simplify the closed polyline with Douglas-Peucker at tolerance
    /// `epsilon`.
    ///
    /// The curve is first split at two mutually distant points, then each
    /// half is simplified on its own; the result keeps the traversal order.
    pub fn approx_polygon(&self, epsilon: f64) -> Vec<Vec2<i32>> {
        let n = self.points.len();
        if n < 3 || epsilon <= 0.0 {
            return self.points.clone();
        }

        let farthest_from = |from: usize| -> (usize, f64) {
            let origin = self.points[from].to_f64();
            let mut best = (from, 0.0);
            for (i, p) in self.points.iter().enumerate() {
                let d = p.to_f64().distance_to(origin);
                if d > best.1 {
                    best = (i, d);
                }
            }
            best
        };
        let (a, _) = farthest_from(0);
        let (b, span) = farthest_from(a);
        if span <= epsilon {
            return vec![self.points[a]];
        }

        // start the ring at `a`; both arcs keep their end points
        let mut ring = to_points(&self.points);
        ring.rotate_left(a);
        let split = (b + n - a) % n;
        let mut back = ring[split..].to_vec();
        back.push(ring[0]);

        let mut polygon = approximate_polygon_dp(&ring[..=split], epsilon, false);
        polygon.pop();
        let mut rest = approximate_polygon_dp(&back, epsilon, false);
        rest.pop();
        polygon.extend(rest);
        polygon.into_iter().map(|p| Vec2::new(p.x, p.y)).collect()
    }
}

fn to_points(points: &[Vec2<i32>]) -> Vec<Point<i32>> {
    points.iter().map(|p| Point::new(p.x, p.y)).collect()
}

// Drop chain points whose incoming and outgoing steps point the same way.
fn compress_chain(mut chain: Vec<Vec2<i32>>) -> Vec<Vec2<i32>> {
    chain.dedup();
    while chain.len() > 1 && chain.first() == chain.last() {
        chain.pop();
    }
    let n = chain.len();
    if n < 3 {
        return chain;
    }
    let kept: Vec<Vec2<i32>> = (0..n)
        .filter(|&i| {
            let prev = chain[(i + n - 1) % n];
            let next = chain[(i + 1) % n];
            chain[i] - prev != next - chain[i]
        })
        .map(|i| chain[i])
        .collect();
    if kept.is_empty() { vec![chain[0]] } else { kept }
}

/// Trace the borders of the foreground components of `mask`.
pub fn find_contours(mask: &Mask, retrieval: Retrieval) -> Vec<Contour> {
    if mask.is_empty() {
        return Vec::new();
    }
    let contours = imageproc::contours::find_contours::<i32>(&mask_to_buffer(mask))
        .into_iter()
        .map(|traced| Contour {
            points: compress_chain(
                traced
                    .points
                    .into_iter()
                    .map(|p| Vec2::new(p.x, p.y))
                    .collect(),
            ),
            is_hole: matches!(traced.border_type, BorderType::Hole),
            parent: traced.parent,
        });

    match retrieval {
        Retrieval::Tree => contours.collect(),
        Retrieval::External => contours.filter(|c| !c.is_hole && c.parent.is_none()).collect(),
    }
}

// Polygons must be open and non-empty for the scanline fill.
fn draw_polygon(canvas: &mut LumaBuffer, points: &[Vec2<i32>]) {
    let mut polygon = to_points(points);
    polygon.dedup();
    while polygon.len() > 1 && polygon.first() == polygon.last() {
        polygon.pop();
    }
    match polygon.as_slice() {
        [] => {}
        [p] => {
            let (w, h) = canvas.dimensions();
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < w && (p.y as u32) < h {
                canvas.put_pixel(p.x as u32, p.y as u32, Luma([255]));
            }
        }
        _ => draw_polygon_mut(canvas, &polygon, Luma([255])),
    }
}

/// Set every pixel inside or on the closed polygon `points`.
pub fn fill_polygon(mask: &mut Mask, points: &[Vec2<i32>]) {
    if mask.is_empty() {
        return;
    }
    let mut canvas = mask_to_buffer(mask);
    draw_polygon(&mut canvas, points);
    *mask = buffer_to_mask(&canvas);
}

/// Fill several contours independently into a fresh mask.
pub fn fill_contours<'a>(size: Vec2<usize>, contours: impl IntoIterator<Item = &'a Contour>) -> Mask {
    let mask = Grid {
        size,
        data: vec![false; size.count()],
    };
    if mask.is_empty() {
        return mask;
    }
    let mut canvas = mask_to_buffer(&mask);
    for contour in contours {
        draw_polygon(&mut canvas, &contour.points);
    }
    buffer_to_mask(&canvas)
}
