//! The incremental multi-attribute range filter.
//!
//! A [`Brush`] keeps, per tracked attribute, an [`AttributeIndex`] and a
//! [`RangeCursor`], plus the combined selection: the events whose rank lies
//! inside the cursor range of *every* tracked attribute. Moving one bound
//! costs a binary search plus work proportional to the number of events that
//! cross it; the catalog is never rescanned.
//!
//! ```
//! use quakebrush::attribute::{Attribute, Bound, Limits};
//! use quakebrush::brush::Brush;
//! use quakebrush::catalog::ColumnCatalog;
//! use quakebrush::cursor::Change;
//!
//! let mut catalog = ColumnCatalog::new(Limits::default());
//! catalog.add_values(Attribute::Magnitude, vec![2.0, 3.5, 3.5, 4.0, 5.0]).unwrap();
//! let mut brush = Brush::new(&catalog).unwrap();
//! assert_eq!(brush.adjust_bound(Attribute::Magnitude, Bound::Low, 3.5), Change::Contracted);
//! assert_eq!(brush.last_delta().iter().collect::<Vec<_>>(), vec![0]);
//! assert_eq!(brush.selected_len(), 4);
//! ```

// selections and deltas are sets of event indices
use roaring::RoaringBitmap;
use tracing::{debug, info, trace};

use crate::attribute::{Attribute, Bound, Limits};
use crate::catalog::Catalog;
use crate::cursor::{Change, RangeCursor};
use crate::error::{BrushError, Result};
use crate::index::AttributeIndex;

#[derive(Debug)]
struct Dimension {
    index: AttributeIndex,
    cursor: RangeCursor,
}

#[derive(Debug)]
pub struct Brush {
    len: usize,
    limits: Limits,
    dimensions: [Option<Dimension>; Attribute::COUNT],
    selection: RoaringBitmap,
    delta: RoaringBitmap,
}

impl Brush {
    /// Tracks every attribute present in the catalog.
    pub fn new(catalog: &impl Catalog) -> Result<Self> {
        let present: Vec<Attribute> = Attribute::ALL
            .into_iter()
            .filter(|a| catalog.contains(*a))
            .collect();
        Self::with_attributes(catalog, &present)
    }

    /// Tracks exactly `attributes`, each of which the catalog must contain.
    /// The columns are copied, so the brush does not observe later changes
    /// to the catalog.
    pub fn with_attributes(catalog: &impl Catalog, attributes: &[Attribute]) -> Result<Self> {
        let len = catalog.size();
        if len == 0 || attributes.is_empty() {
            return Err(BrushError::EmptyCatalog);
        }
        if len > u32::MAX as usize {
            return Err(BrushError::Catalog(format!("{} events can not be brushed", len)));
        }
        let mut dimensions: [Option<Dimension>; Attribute::COUNT] = Default::default();
        for &attribute in attributes {
            let column = catalog
                .column(attribute)
                .ok_or(BrushError::MissingAttribute(attribute))?;
            if column.len() != len {
                return Err(BrushError::Catalog(format!(
                    "{} column has {} events, the catalog has {}",
                    attribute,
                    column.len(),
                    len
                )));
            }
            let index = AttributeIndex::new(column);
            let cursor = RangeCursor::new(&index);
            dimensions[attribute.slot()] = Some(Dimension { index, cursor });
        }
        let mut selection = RoaringBitmap::new();
        selection.insert_range(0..len as u32);
        info!(events = len, attributes = ?attributes, "brush ready");
        Ok(Self {
            len,
            limits: catalog.limits().clone(),
            dimensions,
            selection,
            delta: RoaringBitmap::new(),
        })
    }

    /// Moves one bound of one attribute and updates the selection.
    ///
    /// Proposals for untracked attributes, values outside the attribute's
    /// limits and moves that shift no event all yield [`Change::Unchanged`]
    /// and leave cursors and selection as they were. The returned change is
    /// the realized one: an expansion whose events are all still excluded by
    /// another attribute is `Unchanged`, as is a contraction that only drops
    /// events which were already excluded.
    pub fn adjust_bound(&mut self, attribute: Attribute, bound: Bound, value: f64) -> Change {
        self.delta.clear();
        if !self.limits.admits(attribute, value) {
            trace!(%attribute, %bound, value, "bound outside limits");
            return Change::Unchanged;
        }
        let slot = attribute.slot();
        let shift = match self.dimensions[slot].as_mut() {
            Some(d) => d.cursor.move_bound(&d.index, bound, value),
            None => {
                trace!(%attribute, "attribute not tracked");
                return Change::Unchanged;
            }
        };
        let Some(shift) = shift else {
            trace!(%attribute, %bound, value, "no event crosses the bound");
            return Change::Unchanged;
        };
        let dimensions = &self.dimensions;
        let Some(moved) = &dimensions[slot] else {
            return Change::Unchanged;
        };
        for rank in shift.ranks.clone() {
            let event = moved.index.original(rank);
            match shift.change {
                Change::Contracted => {
                    if self.selection.remove(event) {
                        self.delta.insert(event);
                    }
                }
                Change::Expanded => {
                    if admitted_elsewhere(dimensions, slot, event) {
                        self.selection.insert(event);
                        self.delta.insert(event);
                    }
                }
                Change::Unchanged => (),
            }
        }
        let change = if self.delta.is_empty() {
            Change::Unchanged
        } else {
            shift.change
        };
        debug!(
            %attribute, %bound, value, %change,
            crossed = shift.ranks.len(),
            delta = self.delta.len(),
            selected = self.selection.len(),
            "bound adjusted"
        );
        change
    }

    /// Events accepted by every tracked attribute.
    pub fn selection(&self) -> &RoaringBitmap {
        &self.selection
    }

    /// Events whose membership in [`Brush::selection`] changed during the most
    /// recent [`Brush::adjust_bound`] call. The next call clears and refills
    /// it, so read it straight after each adjustment.
    pub fn last_delta(&self) -> &RoaringBitmap {
        &self.delta
    }

    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
    pub fn selected_len(&self) -> u64 {
        self.selection.len()
    }
    pub fn limits(&self) -> &Limits {
        &self.limits
    }
    pub fn tracked(&self) -> Vec<Attribute> {
        Attribute::ALL
            .into_iter()
            .filter(|a| self.is_tracked(*a))
            .collect()
    }
    pub fn is_tracked(&self, attribute: Attribute) -> bool {
        self.dimensions[attribute.slot()].is_some()
    }
    pub fn cursor(&self, attribute: Attribute) -> Option<RangeCursor> {
        self.dimensions[attribute.slot()].as_ref().map(|d| d.cursor)
    }
    /// Lowest and highest value currently included for `attribute`.
    pub fn bounds(&self, attribute: Attribute) -> Option<(f64, f64)> {
        self.dimensions[attribute.slot()]
            .as_ref()
            .map(|d| d.cursor.values(&d.index))
    }

    /// Recomputes membership of every event from the cursors and compares it
    /// with the incrementally maintained selection. O(n) per attribute.
    ///
    /// # Panics
    /// On any cursor or membership inconsistency.
    pub fn check_invariants(&self) {
        for d in self.dimensions.iter().flatten() {
            assert!(
                d.cursor.low() < d.cursor.high() && d.cursor.high() <= self.len,
                "cursor out of order: {:?}",
                d.cursor
            );
        }
        for event in 0..self.len as u32 {
            let expected = self
                .dimensions
                .iter()
                .flatten()
                .all(|d| d.cursor.contains(d.index.rank(event)));
            assert_eq!(
                self.selection.contains(event),
                expected,
                "selection disagrees with cursors for event {}",
                event
            );
        }
    }
}

fn admitted_elsewhere(dimensions: &[Option<Dimension>], slot: usize, event: u32) -> bool {
    dimensions
        .iter()
        .enumerate()
        .filter(|(s, _)| *s != slot)
        .filter_map(|(_, d)| d.as_ref())
        .all(|d| d.cursor.contains(d.index.rank(event)))
}
