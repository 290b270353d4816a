use criterion::{black_box, Criterion};
use geocurve::dataset::sinaloa;
use geocurve::geodesy::haversine_km;
use geocurve::overlay::{Scene, Style};
use geocurve::pipeline::{bow_curve, derive};
use crate::common::samples::{GRID, PAIRS};

pub fn distance(c: &mut Criterion) {
    c.bench_function("haversine", |b| {
        b.iter(|| {
            for (p, q) in PAIRS.iter() {
                black_box(haversine_km(black_box(*p), black_box(*q)));
            }
        })
    });
}

pub fn curve(c: &mut Criterion) {
    c.bench_function("bow_curve", |b| {
        b.iter(|| {
            for (p, q) in PAIRS.iter() {
                black_box(bow_curve(black_box(*p), black_box(*q)));
            }
        })
    });
}

pub fn grid(c: &mut Criterion) {
    c.bench_function("derive_grid", |b| b.iter(|| black_box(derive(&GRID))));
}

pub fn scene(c: &mut Criterion) {
    c.bench_function("scene_layers", |b| {
        b.iter(|| black_box(Scene::build(sinaloa(), Style::Curved).layers()))
    });
}

pub fn all(c: &mut Criterion) {
    distance(c);
    curve(c);
    grid(c);
    scene(c);
}
