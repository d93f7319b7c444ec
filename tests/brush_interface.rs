use std::sync::Arc;
use std::thread;

use quakebrush::attribute::{Attribute, Bound, Limits};
use quakebrush::brush::Brush;
use quakebrush::catalog::ColumnCatalog;
use quakebrush::cursor::Change;
use quakebrush::interface::BrushInterface;

fn setup() -> BrushInterface {
    let mut catalog = ColumnCatalog::new(Limits::default());
    catalog.add_values(Attribute::Depth, vec![10.0, 2.0, 33.0, 7.5]).unwrap();
    catalog.add_values(Attribute::Magnitude, vec![3.0, 4.5, 2.2, 5.1]).unwrap();
    BrushInterface::new(Brush::new(&catalog).unwrap())
}

#[test]
fn adjustments_carry_their_delta() {
    let interface = setup();
    let first = interface.adjust(Attribute::Depth, Bound::High, 12.0).unwrap();
    assert_eq!(first.change, Change::Contracted);
    assert_eq!(first.delta, vec![2]);
    assert_eq!(first.selected, 3);
    let second = interface.adjust(Attribute::Magnitude, Bound::Low, 4.0).unwrap();
    assert_eq!(second.delta, vec![0]);
    // the first snapshot is unaffected by the second adjustment
    assert_eq!(first.delta, vec![2]);
    let summary = interface.selection(true).unwrap();
    assert_eq!(summary.events, 4);
    assert_eq!(summary.selected, 2);
    assert_eq!(summary.indices, Some(vec![1, 3]));
    assert_eq!(interface.selection(false).unwrap().indices, None);
}

#[test]
fn bounds_follow_the_cursors() {
    let interface = setup();
    interface.adjust(Attribute::Magnitude, Bound::High, 4.6).unwrap();
    let bounds = interface.bounds().unwrap();
    assert_eq!(bounds.len(), 2);
    assert_eq!(bounds[0].attribute, Attribute::Depth);
    assert_eq!((bounds[0].low, bounds[0].high), (2.0, 33.0));
    assert_eq!(bounds[1].attribute, Attribute::Magnitude);
    assert_eq!((bounds[1].low, bounds[1].high), (2.2, 4.5));
    assert_eq!((bounds[1].low_rank, bounds[1].high_rank), (0, 3));
}

#[test]
fn concurrent_callers_are_serialized() {
    let interface = Arc::new(setup());
    let handles: Vec<_> = [(Bound::Low, 3.0), (Bound::High, 30.0), (Bound::Low, 1.0), (Bound::High, 40.0)]
        .into_iter()
        .map(|(bound, value)| {
            let interface = Arc::clone(&interface);
            thread::spawn(move || interface.adjust(Attribute::Depth, bound, value).unwrap())
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    let brush = Arc::try_unwrap(interface).ok().unwrap().into_inner().unwrap();
    brush.check_invariants();
}
