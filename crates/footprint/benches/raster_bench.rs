//! Criterion benchmarks for footprint rasterization.
//!
//! Benchmarks:
//!   - 64-gon ring, ~200 block radius
//!   - courtyard block (square outer with four holes)
//!   - erosion of a large fill
//!
//! Run with: cargo bench -p footprint --bench raster_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use footprint::{rasterize_area, rasterize_ring, Area, Column, Ring};

fn polygon(radius: f64, sides: usize) -> Ring {
    let points = (0..sides)
        .map(|i| {
            let angle = i as f64 / sides as f64 * std::f64::consts::TAU;
            Column::new(
                (angle.cos() * radius).round() as i32,
                (angle.sin() * radius).round() as i32,
            )
        })
        .collect();
    Ring::new(points).expect("polygon ring")
}

fn square(x: i32, z: i32, size: i32) -> Ring {
    Ring::new(vec![
        Column::new(x, z),
        Column::new(x + size, z),
        Column::new(x + size, z + size),
        Column::new(x, z + size),
    ])
    .expect("square ring")
}

// ---------------------------------------------------------------------------
// Benchmark: single ring
// ---------------------------------------------------------------------------

fn bench_ring(c: &mut Criterion) {
    let mut group = c.benchmark_group("raster_ring");
    let ring = polygon(200.0, 64);
    group.bench_function("polygon_64_r200", |b| {
        b.iter(|| black_box(rasterize_ring(black_box(&ring))));
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: area with holes
// ---------------------------------------------------------------------------

fn bench_courtyards(c: &mut Criterion) {
    let mut group = c.benchmark_group("raster_area");
    let area = Area {
        outers: vec![square(0, 0, 120)],
        inners: vec![
            square(10, 10, 30),
            square(70, 10, 30),
            square(10, 70, 30),
            square(70, 70, 30),
        ],
    };
    group.bench_function("courtyard_block_120", |b| {
        b.iter(|| black_box(rasterize_area(black_box(&area))));
    });
    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: erosion
// ---------------------------------------------------------------------------

fn bench_erode(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_set_erode");
    let fill = rasterize_ring(&polygon(80.0, 48));
    group.bench_function("erode_3", |b| {
        b.iter(|| black_box(black_box(&fill).erode(3)));
    });
    group.finish();
}

criterion_group!(benches, bench_ring, bench_courtyards, bench_erode);
criterion_main!(benches);
