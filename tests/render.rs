use itertools::iproduct;
use tilebrot::{
    escape_time, render, shade_pixel, CameraState, Grid, RenderConfig, RenderFailure, Rgb,
    TileScheduler,
};

fn reference_camera() -> CameraState {
    CameraState {
        viewport_size_px: 64.0,
        plane_scale: 64.0,
        offset_x: 0.0,
        offset_y: 0.0,
        origin_px_x: 42.67,
        origin_px_y: 32.0,
    }
}

#[test]
fn tiled_pixel_matches_direct_pipeline() {
    let camera = reference_camera();
    let config = RenderConfig::new(20, 10.0);
    let frame = render(64, 64, &camera, &config).unwrap();

    let c = camera.pixel_to_point(0, 0);
    let direct = tilebrot::palette::colorize(&escape_time(c, &config), &config);
    assert_eq!(frame.pixel(0, 0), direct);
    assert_eq!(frame.pixel(0, 0), shade_pixel(0, 0, &camera, &config));
}

#[test]
fn tiles_evaluated_alone_match_the_full_render() {
    let camera = reference_camera();
    let config = RenderConfig::new(20, 10.0);
    let scheduler = TileScheduler::default();
    let frame = scheduler.render(64, 64, &camera, &config).unwrap();

    for mut tile in scheduler.partition(64, 64, &camera, &config).unwrap() {
        tile.evaluate();
        let (x0, y0) = tile.origin();
        for (y, x) in iproduct!(y0..y0 + tile.height(), x0..x0 + tile.width()) {
            assert_eq!(tile.pixel(x, y), Some(frame.pixel(x, y)));
        }
    }
}

#[test]
fn plane_origin_renders_black() {
    // With the default framing the plane's origin is pixel (2/3 size, 1/2 size).
    let camera = CameraState::framed(96.0);
    for &max in &[1, 2, 20, 200] {
        let config = RenderConfig::new(max, 4.0);
        let frame = render(96, 96, &camera, &config).unwrap();
        assert_eq!(frame.pixel(64, 48), Rgb::BLACK);
    }
}

#[test]
fn lowering_the_budget_keeps_interior_pixels_interior() {
    let camera = reference_camera();
    let deep = render(64, 64, &camera, &RenderConfig::new(40, 10.0)).unwrap();
    let shallow = render(64, 64, &camera, &RenderConfig::new(20, 10.0)).unwrap();
    for (d, s) in deep.pixels().iter().zip(shallow.pixels()) {
        if *d == Rgb::BLACK {
            assert_eq!(*s, Rgb::BLACK);
        }
    }
}

#[test]
fn raising_the_budget_keeps_escape_counts() {
    let camera = reference_camera();
    let shallow = RenderConfig::new(20, 10.0);
    let deep = RenderConfig::new(40, 10.0);
    for (y, x) in iproduct!(0..64, 0..64) {
        let c = camera.pixel_to_point(x, y);
        let a = escape_time(c, &shallow);
        if !a.is_interior(shallow.max_iterations) {
            let b = escape_time(c, &deep);
            assert_eq!(a, b);
            assert!(!b.is_interior(deep.max_iterations));
        }
    }
}

#[test]
fn render_failure_is_all_or_nothing() {
    let camera = reference_camera();
    let config = RenderConfig::new(20, 10.0);
    let result = TileScheduler::new(Grid::new(3, 3)).render(64, 64, &camera, &config);
    assert_eq!(
        result,
        Err(RenderFailure::InvalidPartition {
            width: 64,
            height: 64,
            columns: 3,
            rows: 3
        })
    );
}

#[test]
fn rectangular_images_render() {
    let camera = CameraState::framed(64.0);
    let config = RenderConfig::default();
    let frame = render(128, 64, &camera, &config).unwrap();
    assert_eq!((frame.width(), frame.height()), (128, 64));
    assert_eq!(frame.pixel(100, 10), shade_pixel(100, 10, &camera, &config));
}
