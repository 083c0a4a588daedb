use {
    base::{Grid, Vec2},
    image::{Mask, MaskOps},
    roadmask::{Contour, Retrieval, dilate, fill_contours, fill_polygon, find_contours},
};

fn rect_mask(size: Vec2<usize>, rects: &[(usize, usize, usize, usize)]) -> Mask {
    let mut mask = Mask::clear(size);
    for &(x0, y0, w, h) in rects {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                mask.set(x, y, true);
            }
        }
    }
    mask
}

fn points(coords: &[(i32, i32)]) -> Vec<Vec2<i32>> {
    coords.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
}

#[test]
fn test_rectangle_traces_to_its_corners() {
    let mask = rect_mask(Vec2::new(10, 10), &[(2, 3, 5, 4)]);
    let contours = find_contours(&mask, Retrieval::External);
    assert_eq!(contours.len(), 1);
    let contour = &contours[0];
    assert!(!contour.is_hole);
    assert_eq!(contour.parent, None);
    let mut corners = contour.points.clone();
    corners.sort_by_key(|p| (p.x, p.y));
    assert_eq!(corners, points(&[(2, 3), (2, 6), (6, 3), (6, 6)]));
    assert_eq!(contour.area(), 12.0);
    assert_eq!(contour.perimeter(), 14.0);
}

#[test]
fn test_hierarchy_of_nested_components() {
    // ring with a dot inside its hole, plus a separate block
    let mut mask = rect_mask(Vec2::new(30, 20), &[(1, 1, 15, 15), (20, 2, 5, 5)]);
    for y in 4..13 {
        for x in 4..13 {
            mask.set(x, y, false);
        }
    }
    mask.set(8, 8, true);
    mask.set(9, 8, true);

    let tree = find_contours(&mask, Retrieval::Tree);
    assert_eq!(tree.len(), 4);
    let holes: Vec<usize> = (0..tree.len()).filter(|&i| tree[i].is_hole).collect();
    assert_eq!(holes.len(), 1);
    let hole = holes[0];
    let ring = tree[hole].parent.unwrap();
    assert!(!tree[ring].is_hole);
    assert_eq!(tree[ring].parent, None);
    let dot = tree
        .iter()
        .position(|c| c.parent == Some(hole))
        .expect("dot inside the hole");
    assert!(tree[dot].is_degenerate());

    let external = find_contours(&mask, Retrieval::External);
    assert_eq!(external.len(), 2);
    assert!(external.iter().all(|c| !c.is_hole && c.parent.is_none()));
}

#[test]
fn test_single_pixel_is_degenerate() {
    let mask = rect_mask(Vec2::new(5, 5), &[(2, 2, 1, 1)]);
    let contours = find_contours(&mask, Retrieval::Tree);
    assert_eq!(contours.len(), 1);
    assert_eq!(contours[0].points, points(&[(2, 2)]));
    assert!(contours[0].is_degenerate());
}

#[test]
fn test_components_touching_the_border() {
    let mask = Grid::filled(Vec2::new(6, 4), true).unwrap();
    let contours = find_contours(&mask, Retrieval::External);
    assert_eq!(contours.len(), 1);
    assert_eq!(contours[0].area(), 15.0);
}

#[test]
fn test_fill_restores_traced_shapes() {
    let size = Vec2::new(40, 40);
    let mut disc = Mask::clear(size);
    for y in 0..40i32 {
        for x in 0..40i32 {
            if (x - 20) * (x - 20) + (y - 20) * (y - 20) <= 100 {
                disc.set(x as usize, y as usize, true);
            }
        }
    }
    let ell = rect_mask(size, &[(2, 2, 4, 20), (2, 18, 15, 4)]);
    for mask in [disc, ell] {
        let contours = find_contours(&mask, Retrieval::External);
        let filled = fill_contours(size, contours.iter());
        // the outline runs through boundary pixel centers
        assert!(mask.and_not(&filled).is_clear());
        assert!(filled.and_not(&dilate(&mask, 3)).is_clear());
    }
}

#[test]
fn test_fill_polygon_triangle() {
    let mut mask = Mask::clear(Vec2::new(10, 10));
    fill_polygon(&mut mask, &points(&[(0, 0), (8, 0), (0, 8)]));
    assert!(mask.get(0, 0) && mask.get(8, 0) && mask.get(0, 8) && mask.get(4, 4));
    assert!(!mask.get(5, 4) && !mask.get(5, 5) && !mask.get(9, 9));
    // 9 + 8 + ... + 1 pixels on or under the hypotenuse
    assert!(mask.count() <= 45);
}

#[test]
fn test_shoelace_ignores_orientation() {
    let square = Contour::new(points(&[(0, 0), (0, 10), (10, 10), (10, 0)]));
    let reversed = Contour::new(points(&[(0, 0), (10, 0), (10, 10), (0, 10)]));
    assert_eq!(square.area(), 100.0);
    assert_eq!(reversed.area(), 100.0);
    assert_eq!(square.perimeter(), 40.0);
    assert!(Contour::new(points(&[(0, 0), (5, 5), (10, 10)])).is_degenerate());
}

#[test]
fn test_approx_polygon_keeps_square_corners() {
    // square outline sampled every pixel
    let mut outline = Vec::new();
    for i in 0..20 {
        outline.push(Vec2::new(i, 0));
    }
    for i in 0..20 {
        outline.push(Vec2::new(20, i));
    }
    for i in 0..20 {
        outline.push(Vec2::new(20 - i, 20));
    }
    for i in 0..20 {
        outline.push(Vec2::new(0, 20 - i));
    }
    let contour = Contour::new(outline);
    let mut corners = contour.approx_polygon(1.0);
    corners.sort_by_key(|p| (p.x, p.y));
    assert_eq!(corners, points(&[(0, 0), (0, 20), (20, 0), (20, 20)]));
    assert_eq!(contour.approx_polygon(100.0).len(), 1);
}

#[test]
fn test_fill_skips_empty_and_marks_single_points() {
    let mut mask = Mask::clear(Vec2::new(4, 4));
    fill_polygon(&mut mask, &[]);
    assert!(mask.is_clear());
    fill_polygon(&mut mask, &points(&[(1, 2)]));
    assert!(mask.get(1, 2));
    assert_eq!(mask.count(), 1);
    fill_polygon(&mut mask, &points(&[(9, 9)]));
    assert_eq!(mask.count(), 1);
}
