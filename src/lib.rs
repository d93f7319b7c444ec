//! Quakebrush – incremental range brushing over earthquake catalogs.
//!
//! An interactive client (typically a set of sliders) narrows or widens the
//! selection of events in a large, immutable catalog by moving per-attribute
//! lower and upper bounds. Instead of rescanning the catalog on every move,
//! a [`brush::Brush`] keeps:
//! * per attribute, a sorted [`index::AttributeIndex`] (values, rank →
//!   event permutation and its inverse), built once;
//! * per attribute, a [`cursor::RangeCursor`] of rank bounds moved by binary
//!   search, never splitting a run of equal values;
//! * the combined selection (logical AND of all attribute ranges) and the delta
//!   of the latest move, both as roaring bitmaps of event indices.
//!
//! A bound move costs `O(log n)` for the search plus `O(|delta| × attributes)`
//! for the membership bookkeeping.
//!
//! ## Modules
//! * [`attribute`] – attribute and bound tags, domain [`attribute::Limits`].
//! * [`catalog`] – the [`catalog::Catalog`] trait and a validating in-memory
//!   [`catalog::ColumnCatalog`].
//! * [`index`], [`cursor`], [`brush`] – the engine.
//! * [`interface`] – mutex-guarded access for multi-caller hosts.
//! * [`server`] – a small HTTP surface over an interface.
//! * [`settings`] – layered configuration.
//!
//! ## Quick Start
//! ```
//! use quakebrush::attribute::{Attribute, Bound, Limits};
//! use quakebrush::brush::Brush;
//! use quakebrush::catalog::ColumnCatalog;
//!
//! let mut catalog = ColumnCatalog::new(Limits::default());
//! catalog.add_times(vec![0, 1_000, 2_000]).unwrap();
//! catalog.add_values(Attribute::Magnitude, vec![4.5, 2.1, 6.0]).unwrap();
//! let mut brush = Brush::new(&catalog).unwrap();
//! brush.adjust_bound(Attribute::Magnitude, Bound::Low, 4.0);
//! assert_eq!(brush.selection().iter().collect::<Vec<_>>(), vec![0, 2]);
//! ```

pub mod attribute;
pub mod brush;
pub mod catalog;
pub mod cursor;
pub mod error;
pub mod index;
pub mod interface;
pub mod server;
pub mod settings;
