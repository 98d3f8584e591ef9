#[macro_use]
extern crate criterion;

use criterion::Criterion;
use tilebrot::{render, CameraState, Grid, RenderConfig, Smoothing, TileScheduler};

fn bench_render(c: &mut Criterion) {
    let camera = CameraState::framed(256.0);
    let config = RenderConfig::new(200, 10.0);
    c.bench_function("render 256 smooth", move |b| {
        b.iter(|| render(256, 256, &camera, &config).unwrap())
    });
}

fn bench_banded(c: &mut Criterion) {
    let camera = CameraState::framed(256.0);
    let config = RenderConfig::new(200, 10.0).with_smoothing(Smoothing::Banded);
    c.bench_function("render 256 banded", move |b| {
        b.iter(|| render(256, 256, &camera, &config).unwrap())
    });
}

fn bench_single_tile(c: &mut Criterion) {
    let camera = CameraState::framed(256.0);
    let config = RenderConfig::new(200, 10.0);
    let scheduler = TileScheduler::new(Grid::new(1, 1));
    c.bench_function("render 256 one tile", move |b| {
        b.iter(|| scheduler.render(256, 256, &camera, &config).unwrap())
    });
}

criterion_group!(benches, bench_render, bench_banded, bench_single_tile);
criterion_main!(benches);
