//! Column-oriented earthquake catalogs.
//!
//! A catalog is the immutable dataset a [`crate::brush::Brush`] is built from.
//! The brush only needs the [`Catalog`] trait: the number of events, a copy of
//! each column and the domain [`Limits`] the data was validated against.
//! [`ColumnCatalog`] is the in-memory implementation used by the server and
//! the tests. It validates every column as it is added, so that a brush never
//! sees out-of-domain or NaN values.

// used for timestamps of events
use chrono::{DateTime, Utc};
// used to read column files
use serde::Deserialize;
use std::path::Path;

use crate::attribute::{Attribute, Limits, Span};
use crate::error::{BrushError, Result};

/// Largest number of events a catalog may hold.
pub const MAX_SIZE: usize = 800_000;

pub trait Catalog {
    /// Number of events, 0 until the first column has been added.
    fn size(&self) -> usize;
    fn contains(&self, attribute: Attribute) -> bool;
    /// A private copy of the column, or `None` if the catalog lacks it.
    /// TIME is returned as epoch milliseconds widened to `f64`.
    fn column(&self, attribute: Attribute) -> Option<Vec<f64>>;
    fn limits(&self) -> &Limits;
}

#[derive(Debug, Clone, PartialEq)]
enum Column {
    Times(Vec<i64>),
    Values(Vec<f64>),
}
impl Column {
    fn len(&self) -> usize {
        match self {
            Column::Times(t) => t.len(),
            Column::Values(v) => v.len(),
        }
    }
    fn to_f64(&self) -> Vec<f64> {
        match self {
            Column::Times(t) => t.iter().map(|&ms| ms as f64).collect(),
            Column::Values(v) => v.clone(),
        }
    }
    fn select(&self, indices: &[u32]) -> Column {
        match self {
            Column::Times(t) => Column::Times(indices.iter().map(|&i| t[i as usize]).collect()),
            Column::Values(v) => Column::Values(indices.iter().map(|&i| v[i as usize]).collect()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColumnCatalog {
    limits: Limits,
    size: Option<usize>,
    columns: [Option<Column>; Attribute::COUNT],
    extents: [Option<Span>; Attribute::COUNT],
}

impl ColumnCatalog {
    pub fn new(limits: Limits) -> Self {
        Self {
            limits,
            size: None,
            columns: Default::default(),
            extents: [None; Attribute::COUNT],
        }
    }

    /// Adds event times (epoch milliseconds), which must be sorted ascending.
    pub fn add_times(&mut self, times: Vec<i64>) -> Result<()> {
        self.check_shape(Attribute::Time, times.len())?;
        if times.windows(2).any(|w| w[0] > w[1]) {
            return Err(BrushError::Catalog("event times are not sorted ascending".into()));
        }
        if let Some(ms) = times.iter().find(|&&ms| !self.limits.admits(Attribute::Time, ms as f64)) {
            return Err(BrushError::Catalog(format!("time {} is outside the time limits", ms)));
        }
        let extent = Span::new(times[0] as f64, times[times.len() - 1] as f64);
        self.insert(Attribute::Time, Column::Times(times), extent);
        Ok(())
    }

    /// Adds a floating point column. Every value must lie inside the
    /// attribute's limits.
    pub fn add_values(&mut self, attribute: Attribute, values: Vec<f64>) -> Result<()> {
        if attribute == Attribute::Time {
            return Err(BrushError::Catalog("time must be added as epoch milliseconds".into()));
        }
        self.check_shape(attribute, values.len())?;
        let span = self.limits.span(attribute);
        if let Some((i, v)) = values.iter().enumerate().find(|(_, v)| !span.contains(**v)) {
            return Err(BrushError::Catalog(format!(
                "{} value {} at index {} is outside [{}, {}]",
                attribute, v, i, span.min, span.max
            )));
        }
        let extent = values.iter().fold(Span::new(f64::INFINITY, f64::NEG_INFINITY), |s, &v| {
            Span::new(s.min.min(v), s.max.max(v))
        });
        self.insert(attribute, Column::Values(values), extent);
        Ok(())
    }

    fn check_shape(&self, attribute: Attribute, len: usize) -> Result<()> {
        if self.contains(attribute) {
            return Err(BrushError::Catalog(format!("catalog already contains {}", attribute)));
        }
        if len == 0 {
            return Err(BrushError::Catalog(format!("{} column is empty", attribute)));
        }
        if len > MAX_SIZE {
            return Err(BrushError::Catalog(format!(
                "{} column has {} events, the limit is {}",
                attribute, len, MAX_SIZE
            )));
        }
        match self.size {
            Some(size) if size != len => Err(BrushError::Catalog(format!(
                "{} column has {} events, the catalog has {}",
                attribute, len, size
            ))),
            _ => Ok(()),
        }
    }

    fn insert(&mut self, attribute: Attribute, column: Column, extent: Span) {
        self.size.get_or_insert(column.len());
        self.columns[attribute.slot()] = Some(column);
        self.extents[attribute.slot()] = Some(extent);
    }

    pub fn attributes(&self) -> Vec<Attribute> {
        Attribute::ALL.into_iter().filter(|a| self.contains(*a)).collect()
    }
    pub fn min(&self, attribute: Attribute) -> Option<f64> {
        self.extents[attribute.slot()].map(|s| s.min)
    }
    pub fn max(&self, attribute: Attribute) -> Option<f64> {
        self.extents[attribute.slot()].map(|s| s.max)
    }
    pub fn min_date(&self) -> Option<DateTime<Utc>> {
        self.time(0)
    }
    pub fn max_date(&self) -> Option<DateTime<Utc>> {
        self.time(self.size().checked_sub(1)?)
    }
    pub fn time(&self, index: usize) -> Option<DateTime<Utc>> {
        match &self.columns[Attribute::Time.slot()] {
            Some(Column::Times(t)) => DateTime::<Utc>::from_timestamp_millis(*t.get(index)?),
            _ => None,
        }
    }
    pub fn value(&self, attribute: Attribute, index: usize) -> Option<f64> {
        match &self.columns[attribute.slot()] {
            Some(Column::Values(v)) => v.get(index).copied(),
            Some(Column::Times(t)) => t.get(index).map(|&ms| ms as f64),
            None => None,
        }
    }

    /// Short description of an event, e.g. `(M 4.2)   01/31/2010  04:05:06  UTC`.
    pub fn event_string(&self, index: usize) -> Option<String> {
        let magnitude = self.value(Attribute::Magnitude, index)?;
        let time = self.time(index)?;
        Some(format!("(M {})   {}", magnitude, time.format("%m/%d/%Y  %H:%M:%S  UTC")))
    }

    /// Builds a new catalog from the events at `indices`, e.g. the current
    /// selection of a brush. Indices must be ascending for catalogs with
    /// times, since times must stay sorted.
    pub fn derive(&self, indices: &[u32]) -> Result<ColumnCatalog> {
        if let Some(&i) = indices.iter().find(|&&i| i as usize >= self.size()) {
            return Err(BrushError::Catalog(format!(
                "index {} is out of range for {} events",
                i,
                self.size()
            )));
        }
        let mut derived = ColumnCatalog::new(self.limits.clone());
        for attribute in self.attributes() {
            match self.columns[attribute.slot()].as_ref().map(|c| c.select(indices)) {
                Some(Column::Times(t)) => derived.add_times(t)?,
                Some(Column::Values(v)) => derived.add_values(attribute, v)?,
                None => (),
            }
        }
        Ok(derived)
    }

    /// Reads a column-oriented JSON object such as
    /// `{"time": [..], "latitude": [..], "magnitude": [..]}`.
    pub fn from_json(text: &str, limits: Limits) -> Result<ColumnCatalog> {
        let file: CatalogFile = serde_json::from_str(text)?;
        let mut catalog = ColumnCatalog::new(limits);
        if let Some(times) = file.time {
            catalog.add_times(times)?;
        }
        for (attribute, values) in [
            (Attribute::Latitude, file.latitude),
            (Attribute::Longitude, file.longitude),
            (Attribute::Depth, file.depth),
            (Attribute::Magnitude, file.magnitude),
        ] {
            if let Some(values) = values {
                catalog.add_values(attribute, values)?;
            }
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>, limits: Limits) -> Result<ColumnCatalog> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text, limits)
    }
}

impl Catalog for ColumnCatalog {
    fn size(&self) -> usize {
        self.size.unwrap_or(0)
    }
    fn contains(&self, attribute: Attribute) -> bool {
        self.columns[attribute.slot()].is_some()
    }
    fn column(&self, attribute: Attribute) -> Option<Vec<f64>> {
        self.columns[attribute.slot()].as_ref().map(Column::to_f64)
    }
    fn limits(&self) -> &Limits {
        &self.limits
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    time: Option<Vec<i64>>,
    latitude: Option<Vec<f64>>,
    longitude: Option<Vec<f64>>,
    depth: Option<Vec<f64>>,
    magnitude: Option<Vec<f64>>,
}
