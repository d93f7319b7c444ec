//! Shared, lock-guarded access to a brush.
//!
//! A [`Brush`] is single-threaded: one adjustment at a time, and its delta is
//! only meaningful until the next adjustment. Hosts with several callers (the
//! HTTP server) go through a [`BrushInterface`], which serializes adjustments
//! behind a mutex and copies the delta out while still holding the lock.

use serde::Serialize;
use std::sync::{Mutex, MutexGuard};

use crate::attribute::{Attribute, Bound};
use crate::brush::Brush;
use crate::cursor::Change;
use crate::error::{BrushError, Result};

/// What one adjustment did, detached from the brush.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub change: Change,
    pub delta: Vec<u32>,
    pub selected: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeBounds {
    pub attribute: Attribute,
    pub low: f64,
    pub high: f64,
    pub low_rank: usize,
    pub high_rank: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSummary {
    pub events: usize,
    pub selected: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indices: Option<Vec<u32>>,
}

pub struct BrushInterface {
    brush: Mutex<Brush>,
}

impl BrushInterface {
    pub fn new(brush: Brush) -> Self {
        Self { brush: Mutex::new(brush) }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Brush>> {
        self.brush.lock().map_err(|e| BrushError::Lock(e.to_string()))
    }

    pub fn adjust(&self, attribute: Attribute, bound: Bound, value: f64) -> Result<Adjustment> {
        let mut brush = self.lock()?;
        let change = brush.adjust_bound(attribute, bound, value);
        Ok(Adjustment {
            change,
            delta: brush.last_delta().iter().collect(),
            selected: brush.selected_len(),
        })
    }

    /// Selection size, with the selected indices when `with_indices` is set.
    pub fn selection(&self, with_indices: bool) -> Result<SelectionSummary> {
        let brush = self.lock()?;
        Ok(SelectionSummary {
            events: brush.len(),
            selected: brush.selected_len(),
            indices: with_indices.then(|| brush.selection().iter().collect()),
        })
    }

    pub fn bounds(&self) -> Result<Vec<AttributeBounds>> {
        let brush = self.lock()?;
        Ok(brush
            .tracked()
            .into_iter()
            .filter_map(|attribute| {
                let (low, high) = brush.bounds(attribute)?;
                let cursor = brush.cursor(attribute)?;
                Some(AttributeBounds {
                    attribute,
                    low,
                    high,
                    low_rank: cursor.low(),
                    high_rank: cursor.high(),
                })
            })
            .collect())
    }

    pub fn into_inner(self) -> Result<Brush> {
        self.brush.into_inner().map_err(|e| BrushError::Lock(e.to_string()))
    }
}
