use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use quakebrush::attribute::{Attribute, Bound, Limits};
use quakebrush::brush::Brush;
use quakebrush::catalog::{ColumnCatalog, MAX_SIZE};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn catalog(n: usize) -> ColumnCatalog {
    let mut rng = StdRng::seed_from_u64(7);
    let mut catalog = ColumnCatalog::new(Limits::default());
    let mut time = 1_262_304_000_000i64;
    let times = (0..n)
        .map(|_| {
            time += rng.gen_range(0..60_000);
            time
        })
        .collect();
    catalog.add_times(times).unwrap();
    let columns = [
        (Attribute::Latitude, 32.0, 42.0),
        (Attribute::Longitude, -125.0, -114.0),
        (Attribute::Depth, 0.0, 30.0),
        (Attribute::Magnitude, -1.0, 7.0),
    ];
    for (attribute, min, max) in columns {
        let values = (0..n)
            .map(|_| (rng.gen_range(min..max) * 100.0_f64).round() / 100.0)
            .collect();
        catalog.add_values(attribute, values).unwrap();
    }
    catalog
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let catalog = catalog(MAX_SIZE);

    c.bench_function("build 800k", |b| b.iter(|| Brush::new(black_box(&catalog)).unwrap()));

    let mut brush = Brush::new(&catalog).unwrap();
    let mut toggle = false;
    c.bench_function("magnitude low step", |b| {
        b.iter(|| {
            toggle = !toggle;
            let value = if toggle { 2.5 } else { 2.4 };
            brush.adjust_bound(Attribute::Magnitude, Bound::Low, black_box(value))
        })
    });

    let mut brush = Brush::new(&catalog).unwrap();
    brush.adjust_bound(Attribute::Depth, Bound::High, 10.0);
    let mut toggle = false;
    c.bench_function("magnitude low sweep", |b| {
        b.iter(|| {
            toggle = !toggle;
            let value = if toggle { 5.0 } else { -1.0 };
            brush.adjust_bound(Attribute::Magnitude, Bound::Low, black_box(value))
        })
    });

    let mut brush = Brush::new(&catalog).unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    c.bench_function("random bound", |b| {
        b.iter(|| {
            let attribute = Attribute::ALL[rng.gen_range(1..Attribute::COUNT)];
            let bound = if rng.gen_bool(0.5) { Bound::Low } else { Bound::High };
            let value = match attribute {
                Attribute::Latitude => rng.gen_range(32.0..42.0),
                Attribute::Longitude => rng.gen_range(-125.0..-114.0),
                Attribute::Depth => rng.gen_range(0.0..30.0),
                _ => rng.gen_range(-1.0..7.0),
            };
            brush.adjust_bound(attribute, bound, black_box(value))
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
