use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use weekend_engine::{group_by_weekend, resolve_weekend, WeekendOptions};

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_weekend");
    for (name, input) in [
        ("date_only", "2025-06-14"),
        ("rfc3339", "2025-06-14T19:00:00Z"),
        ("naive_datetime", "2025-06-14 19:00"),
        ("invalid", "invalid"),
    ] {
        group.bench_function(name, |b| b.iter(|| resolve_weekend(black_box(input))));
    }
    group.finish();
}

fn bench_grouping(c: &mut Criterion) {
    let timestamps: Vec<String> = (0..1_000)
        .map(|i| format!("2025-{:02}-{:02}T19:00:00Z", i % 12 + 1, i % 28 + 1))
        .collect();
    let options = WeekendOptions::default();

    c.bench_function("group_by_weekend_1000", |b| {
        b.iter(|| {
            group_by_weekend(
                black_box(timestamps.iter()),
                |ts| Some(ts.as_str()),
                &options,
            )
        })
    });
}

criterion_group!(benches, bench_resolve, bench_grouping);
criterion_main!(benches);
