//! Criterion benchmarks for structure synthesis.
//!
//! Benchmarks:
//!   - extent resolution over a spread of tag sets
//!   - one district of 64 buildings built through the plugin
//!
//! Run with: cargo bench -p structures --features bench --bench synthesis_bench

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use footprint::tags_from;
use structures::extent::{resolve_extent, ExtentKind};
use structures::test_harness::TestSite;
use structures::SynthesisConfig;

fn bench_extent(c: &mut Criterion) {
    let config = SynthesisConfig::default();
    let tag_sets = [
        tags_from([("building", "yes")]),
        tags_from([("building", "yes"), ("building:levels", "5"), ("roof:shape", "gabled")]),
        tags_from([("building:part", "yes"), ("min_level", "2"), ("max_level", "7")]),
        tags_from([("building:part", "yes"), ("min_height", "12 m"), ("height", "40'")]),
        tags_from([("building", "yes"), ("bridge", "yes"), ("min_height", "6")]),
    ];
    c.bench_function("resolve_extent", |b| {
        b.iter(|| {
            for tags in &tag_sets {
                black_box(resolve_extent(black_box(tags), ExtentKind::Part, &config));
                black_box(resolve_extent(black_box(tags), ExtentKind::Standalone, &config));
            }
        })
    });
}

/// 8x8 blocks of 12x12 buildings with 4-column streets, mixed heights and roofs.
fn district() -> TestSite {
    let roofs = ["flat", "gabled", "hipped", "pyramidal"];
    let mut site = TestSite::new();
    for i in 0..8 {
        for j in 0..8 {
            let (x, z) = (i * 16, j * 16);
            let levels = (1 + (i + j) % 6).to_string();
            let roof = roofs[((i * 8 + j) % 4) as usize];
            site = site.with_footprint(
                (i * 8 + j + 1) as i64,
                (x, z),
                (x + 12, z + 12),
                &[("building", "yes"), ("building:levels", levels.as_str()), ("roof:shape", roof)],
            );
        }
    }
    site
}

fn bench_district(c: &mut Criterion) {
    let mut group = c.benchmark_group("district");
    group.sample_size(10);
    group.bench_function("64_buildings", |b| {
        b.iter_batched(
            district,
            |mut site| black_box(site.run()),
            criterion::BatchSize::LargeInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_extent, bench_district);
criterion_main!(benches);
