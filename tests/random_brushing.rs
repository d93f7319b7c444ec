use quakebrush::attribute::{Attribute, Bound, Limits};
use quakebrush::brush::Brush;
use quakebrush::catalog::{Catalog, ColumnCatalog};
use quakebrush::cursor::Change;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roaring::RoaringBitmap;

// coarse values so that tie groups are common
fn catalog(rng: &mut StdRng, n: usize) -> ColumnCatalog {
    let mut catalog = ColumnCatalog::new(Limits::default());
    let mut time = 0i64;
    let times: Vec<i64> = (0..n)
        .map(|_| {
            time += rng.gen_range(0..3);
            time
        })
        .collect();
    catalog.add_times(times).unwrap();
    let columns = [
        (Attribute::Latitude, -30.0, 30.0),
        (Attribute::Longitude, -120.0, -110.0),
        (Attribute::Depth, 0.0, 20.0),
        (Attribute::Magnitude, 1.0, 6.0),
    ];
    for (attribute, min, max) in columns {
        let values = (0..n)
            .map(|_| (rng.gen_range(min..max) * 2.0_f64).round() / 2.0)
            .collect();
        catalog.add_values(attribute, values).unwrap();
    }
    catalog
}

fn proposal(rng: &mut StdRng, catalog: &ColumnCatalog, attribute: Attribute) -> f64 {
    let column = catalog.column(attribute).unwrap();
    match rng.gen_range(0..4) {
        // exactly a stored value
        0 | 1 => column[rng.gen_range(0..column.len())],
        // anywhere in the data range and a bit beyond
        2 => {
            let min = catalog.min(attribute).unwrap();
            let max = catalog.max(attribute).unwrap();
            rng.gen_range(min - 1.0..max + 1.0)
        }
        // mostly outside the limits
        _ => rng.gen_range(-1000.0..1000.0),
    }
}

#[test]
fn selection_always_matches_cursors() {
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..5 {
        let n = rng.gen_range(1..400);
        let catalog = catalog(&mut rng, n);
        let mut brush = Brush::new(&catalog).unwrap();
        for _ in 0..300 {
            let attribute = Attribute::ALL[rng.gen_range(0..Attribute::COUNT)];
            let bound = if rng.gen_bool(0.5) { Bound::Low } else { Bound::High };
            let value = proposal(&mut rng, &catalog, attribute);
            let before: RoaringBitmap = brush.selection().clone();
            let change = brush.adjust_bound(attribute, bound, value);
            let after = brush.selection();
            // the delta is exactly the realized change
            assert_eq!(brush.last_delta(), &(&before ^ after));
            match change {
                Change::Unchanged => assert!(brush.last_delta().is_empty()),
                Change::Expanded => assert!(after.is_superset(&before) && after != &before),
                Change::Contracted => assert!(after.is_subset(&before) && after != &before),
            }
            brush.check_invariants();
        }
    }
}

#[test]
fn selection_matches_brute_force_filter() {
    let mut rng = StdRng::seed_from_u64(99);
    let n = 250;
    let catalog = catalog(&mut rng, n);
    let mut brush = Brush::new(&catalog).unwrap();
    for _ in 0..200 {
        let attribute = Attribute::ALL[rng.gen_range(0..Attribute::COUNT)];
        let bound = if rng.gen_bool(0.5) { Bound::Low } else { Bound::High };
        let value = proposal(&mut rng, &catalog, attribute);
        brush.adjust_bound(attribute, bound, value);
        let ranges: Vec<(Attribute, f64, f64)> = brush
            .tracked()
            .into_iter()
            .map(|a| {
                let (low, high) = brush.bounds(a).unwrap();
                (a, low, high)
            })
            .collect();
        let expected: RoaringBitmap = (0..n as u32)
            .filter(|&e| {
                ranges.iter().all(|&(a, low, high)| {
                    let v = catalog.value(a, e as usize).unwrap();
                    low <= v && v <= high
                })
            })
            .collect();
        assert_eq!(brush.selection(), &expected);
    }
}
