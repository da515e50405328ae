use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trackmap_core::{Chart, Feature, MonospaceMeasurer};

fn generate_features(count: usize) -> Vec<Feature> {
    // Staggered genes, roughly five deep at any point
    (0..count)
        .map(|i| {
            let position = (i as i64) * 200;
            let length = 600 + ((i * 7919) % 500) as i64;
            Feature::gene(position, length, None)
        })
        .collect()
}

fn bench_allocation(c: &mut Criterion) {
    let features = generate_features(10_000);

    c.bench_function("allocate_10k", |b| {
        b.iter(|| {
            let mut chart = Chart::with_width(1200).expect("valid width");
            chart.load_features(black_box(features.clone()));
            black_box(chart.track_count())
        })
    });
}

fn bench_frame(c: &mut Criterion) {
    let mut chart = Chart::with_width(1200).expect("valid width");
    chart.load_features(generate_features(10_000));
    let measurer = MonospaceMeasurer::default();

    c.bench_function("frame_10k", |b| {
        b.iter(|| {
            let frame = chart.frame(black_box(&measurer)).expect("frame");
            black_box(frame.ticks.len())
        })
    });
}

fn bench_slice(c: &mut Criterion) {
    let mut chart = Chart::with_width(1200).expect("valid width");
    chart.load_features(generate_features(10_000));

    c.bench_function("slice_10k", |b| {
        b.iter(|| black_box(chart.slice(black_box(500_000), black_box(700_000)).track_count()))
    });
}

criterion_group!(benches, bench_allocation, bench_frame, bench_slice);
criterion_main!(benches);
