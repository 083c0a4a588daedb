use {
    base::{Grid, Vec2},
    image::{ColorImage, DepthImage, Mask, MaskOps, PixelFormat},
    roadmask::{
        ConfigError, Contour, Diagnostics, LaneDepthSource, Pipeline, PipelineConfig, Stage,
        erode, fill_polygon,
    },
};

const FRAME: Vec2<usize> = Vec2::new(1280, 720);

fn depth_ramp(size: Vec2<usize>) -> DepthImage {
    let data = (0..size.count()).map(|i| (i % 4000) as u16 + 1).collect();
    Grid::new(size, data).unwrap()
}

fn octagon_vertices(center: Vec2<i32>, radius: f64) -> Vec<Vec2<i32>> {
    (0..8)
        .map(|k| {
            let angle = std::f64::consts::PI / 8.0 + std::f64::consts::PI * k as f64 / 4.0;
            Vec2::new(
                center.x + (radius * angle.cos()).round() as i32,
                center.y + (radius * angle.sin()).round() as i32,
            )
        })
        .collect()
}

fn octagon(size: Vec2<usize>, center: Vec2<i32>, radius: f64) -> Mask {
    let mut mask = Mask::clear(size);
    fill_polygon(&mut mask, &octagon_vertices(center, radius));
    mask
}

fn stripe(size: Vec2<usize>, origin: Vec2<usize>, extent: Vec2<usize>) -> Mask {
    let mut mask = Mask::clear(size);
    for y in origin.y..origin.y + extent.y {
        for x in origin.x..origin.x + extent.x {
            mask.set(x, y, true);
        }
    }
    mask
}

fn paint(mask: &Mask) -> ColorImage {
    let mut image = ColorImage::black(mask.size, PixelFormat::Bgr8);
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.get(x, y) {
                image.set_pixel(x, y, [255, 255, 255]);
            }
        }
    }
    image
}

fn contains(outer: &Mask, inner: &Mask) -> bool {
    inner.and_not(outer).is_clear()
}

#[test]
fn test_black_frames_give_empty_outputs() {
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let color = ColorImage::black(FRAME, PixelFormat::Bgr8);
    let out = pipeline.run(&color, &depth_ramp(FRAME)).unwrap();

    assert_eq!(out.pothole_mask.size, FRAME);
    assert_eq!(out.lane_depth.size, FRAME);
    assert!(out.pothole_mask.is_clear());
    assert!(out.lane_mask.is_clear());
    assert!(out.pothole_depth.data.iter().all(|&d| d == 0));
    assert!(out.lane_depth.data.iter().all(|&d| d == 0));
    assert_eq!(out.potholes().count(), 0);
    assert_eq!(out.lanes().count(), 0);
}

#[test]
fn test_octagon_is_a_pothole() {
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let blob = octagon(FRAME, Vec2::new(640, 610), 50.0);
    let depth = depth_ramp(FRAME);
    let out = pipeline.run(&paint(&blob), &depth).unwrap();

    assert!(!out.pothole_mask.is_clear());
    // the traced edge ring sits within a pixel or two of the painted step, so
    // the mask differs from the eroded blob by a band at most three pixels wide
    let outline = Contour::new(octagon_vertices(Vec2::new(640, 610), 50.0)).perimeter();
    let off = out.pothole_mask.xor(&erode(&blob, 3)).count();
    assert!((off as f64) <= 3.0 * outline, "{off} pixels off, outline {outline}");
    assert!(off * 10 < blob.count());
    assert!(out.lane_mask.is_clear());
    assert_eq!(out.potholes().count(), 1);

    for (i, (&d, &m)) in out.pothole_depth.data.iter().zip(&out.pothole_mask.data).enumerate() {
        assert_eq!(d, if m { depth.data[i] } else { 0 });
    }
}

#[test]
fn test_stripe_is_a_lane() {
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let paint_mark = stripe(FRAME, Vec2::new(540, 600), Vec2::new(200, 20));
    let out = pipeline.run(&paint(&paint_mark), &depth_ramp(FRAME)).unwrap();

    assert!(out.pothole_mask.is_clear());
    assert!(!out.lane_mask.is_clear());
    assert!(contains(&out.lane_mask, &erode(&paint_mark, 5)));
    assert!(contains(&paint_mark, &out.lane_mask));
    assert!(out.lane_depth.data.iter().zip(&out.lane_mask.data).all(|(&d, &m)| m == (d != 0)));
}

#[test]
fn test_outside_roi_is_ignored() {
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let blob = octagon(FRAME, Vec2::new(640, 250), 50.0);
    let out = pipeline.run(&paint(&blob), &depth_ramp(FRAME)).unwrap();
    assert!(out.pothole_mask.is_clear());
    assert!(out.lane_mask.is_clear());
}

#[test]
fn test_repeated_runs_are_identical() {
    let size = Vec2::new(320, 200);
    let config = PipelineConfig {
        roi: base::Rect::new(Vec2::new(0, 40), Vec2::new(320, 160)),
        ..Default::default()
    };
    let pipeline = Pipeline::new(config).unwrap();
    let scene = octagon(size, Vec2::new(90, 120), 40.0)
        .xor(&stripe(size, Vec2::new(180, 100), Vec2::new(120, 25)));
    let color = paint(&scene);
    let depth = depth_ramp(size);

    let first = pipeline.run(&color, &depth).unwrap();
    let second = pipeline.run(&color, &depth).unwrap();
    assert_eq!(first.pothole_mask, second.pothole_mask);
    assert_eq!(first.lane_mask, second.lane_mask);
    assert_eq!(first.pothole_depth, second.pothole_depth);
    assert_eq!(first.lane_depth, second.lane_depth);
    assert_eq!(first.regions, second.regions);
    assert!(first.pothole_mask.is_disjoint(&first.lane_mask));
}

#[test]
fn test_even_blur_kernel_is_rejected() {
    let config = PipelineConfig {
        blur_kernel: 10,
        ..Default::default()
    };
    assert_eq!(
        Pipeline::new(config).unwrap_err(),
        ConfigError::Kernel {
            name: "blur",
            size: 10
        }
    );
}

#[test]
fn test_mismatched_depth_is_rejected() {
    let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
    let color = ColorImage::black(FRAME, PixelFormat::Bgr8);
    assert!(pipeline.run(&color, &depth_ramp(Vec2::new(640, 480))).is_err());
}

#[test]
fn test_everything_mask_as_lane_depth() {
    let size = Vec2::new(320, 200);
    let config = PipelineConfig {
        roi: base::Rect::new(Vec2::new(0, 40), Vec2::new(320, 160)),
        lane_depth_source: LaneDepthSource::EverythingMask,
        ..Default::default()
    };
    let scene = octagon(size, Vec2::new(160, 120), 40.0);
    let out = Pipeline::new(config).unwrap().run(&paint(&scene), &depth_ramp(size)).unwrap();
    // the pothole is part of the surface, so its depth shows up in both
    assert!(out.lane_mask.is_clear());
    assert!(out.lane_depth.data.iter().any(|&d| d != 0));
}

#[derive(Default)]
struct Recorder {
    masks: Vec<Stage>,
    contour_sets: Vec<(Stage, usize)>,
}

impl Diagnostics for Recorder {
    fn mask(&mut self, stage: Stage, _mask: &Mask) {
        self.masks.push(stage);
    }

    fn contours(&mut self, stage: Stage, contours: &[Contour]) {
        self.contour_sets.push((stage, contours.len()));
    }
}

#[test]
fn test_diagnostics_see_every_stage() {
    let size = Vec2::new(160, 120);
    let config = PipelineConfig {
        roi: base::Rect::covering(size),
        ..Default::default()
    };
    let mut recorder = Recorder::default();
    Pipeline::new(config)
        .unwrap()
        .run_with(&ColorImage::black(size, PixelFormat::Rgb8), &depth_ramp(size), &mut recorder)
        .unwrap();
    assert_eq!(recorder.masks.first(), Some(&Stage::Surface));
    assert_eq!(recorder.masks.last(), Some(&Stage::Lanes));
    assert!(recorder.masks.contains(&Stage::DilatedEdges));
    assert_eq!(
        recorder.contour_sets,
        vec![(Stage::PotholeCandidates, 0), (Stage::LaneContours, 0)]
    );
}
