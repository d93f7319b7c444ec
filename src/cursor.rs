//! Rank cursors over an [`AttributeIndex`].
//!
//! A [`RangeCursor`] delimits the sorted sub-range `[low, high)` of one
//! attribute that is currently accepted. Moving a bound is a binary search
//! restricted to either the included or the excluded part of the index,
//! followed by tie-grouping: events sharing a value always end up on the same
//! side of a bound. Hence `low` always sits at the start of a run of equal
//! values and `high - 1` at the end of one.
//!
//! A cursor never reaches zero width: `0 <= low < high <= n` holds after every
//! move, and a violation panics.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

use crate::attribute::Bound;
use crate::index::AttributeIndex;

/// Outcome of one bound adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Change {
    Expanded,
    Contracted,
    Unchanged,
}
impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Change::Expanded => write!(f, "expanded"),
            Change::Contracted => write!(f, "contracted"),
            Change::Unchanged => write!(f, "unchanged"),
        }
    }
}

/// Ranks that crossed a bound during one move, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub change: Change,
    pub ranks: Range<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeCursor {
    low: usize,
    high: usize,
}

impl RangeCursor {
    /// A cursor accepting every rank of `index`.
    ///
    /// # Panics
    /// If the index is empty.
    pub fn new(index: &AttributeIndex) -> Self {
        assert!(!index.is_empty(), "can not place a cursor on an empty index");
        Self {
            low: 0,
            high: index.len(),
        }
    }
    pub fn low(&self) -> usize {
        self.low
    }
    pub fn high(&self) -> usize {
        self.high
    }
    pub fn contains(&self, rank: usize) -> bool {
        self.low <= rank && rank < self.high
    }
    pub fn width(&self) -> usize {
        self.high - self.low
    }
    /// Lowest and highest currently included values.
    pub fn values(&self, index: &AttributeIndex) -> (f64, f64) {
        (index.value(self.low), index.value(self.high - 1))
    }

    pub fn move_bound(&mut self, index: &AttributeIndex, bound: Bound, value: f64) -> Option<Shift> {
        match bound {
            Bound::Low => self.move_low(index, value),
            Bound::High => self.move_high(index, value),
        }
    }

    /// Moves the lower bound so that the lowest included value is the smallest
    /// value `>= value`. Returns `None` when no rank changes side.
    pub fn move_low(&mut self, index: &AttributeIndex, value: f64) -> Option<Shift> {
        let old = self.low;
        let old_value = index.value(old);
        if value.is_nan() || value == old_value {
            return None;
        }
        let found = if value > old_value {
            index.lower_bound(old, self.high, value)
        } else {
            index.lower_bound(0, old, value)
        };
        let mut candidate = found.min(self.high - 1);
        while candidate > 0 && index.value(candidate - 1) == index.value(candidate) {
            candidate -= 1;
        }
        if candidate == old {
            return None;
        }
        self.low = candidate;
        self.check(index);
        Some(if candidate < old {
            Shift { change: Change::Expanded, ranks: candidate..old }
        } else {
            Shift { change: Change::Contracted, ranks: old..candidate }
        })
    }

    /// Moves the upper bound so that the highest included value is the largest
    /// value `<= value`. Returns `None` when no rank changes side.
    pub fn move_high(&mut self, index: &AttributeIndex, value: f64) -> Option<Shift> {
        let old = self.high;
        let n = index.len();
        let old_value = index.value(old - 1);
        if value.is_nan() || value == old_value {
            return None;
        }
        let found = if value < old_value {
            // rank `low` stays included whatever happens
            index.lower_bound(self.low + 1, old, value)
        } else {
            index.lower_bound(old, n, value)
        };
        // last rank holding a value <= `value`
        let mut candidate = if found < n && index.value(found) == value {
            found
        } else {
            found - 1
        };
        candidate = candidate.max(self.low);
        while candidate + 1 < n && index.value(candidate + 1) == index.value(candidate) {
            candidate += 1;
        }
        let high = candidate + 1;
        if high == old {
            return None;
        }
        self.high = high;
        self.check(index);
        Some(if high > old {
            Shift { change: Change::Expanded, ranks: old..high }
        } else {
            Shift { change: Change::Contracted, ranks: high..old }
        })
    }

    fn check(&self, index: &AttributeIndex) {
        assert!(
            self.low < self.high && self.high <= index.len(),
            "cursor crossed itself: low {} high {} n {}",
            self.low,
            self.high,
            index.len()
        );
    }
}
