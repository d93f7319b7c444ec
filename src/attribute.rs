// used to (de)serialize attribute names and limits from settings and requests
use serde::{Deserialize, Serialize};

// used to print out readable forms of an attribute
use std::fmt;
// used when parsing an attribute from a string
use std::str::FromStr;

use crate::error::BrushError;

// ------------- Attribute -------------
/// The brushable columns of an earthquake catalog.
///
/// The discriminant doubles as the slot of the attribute in the fixed-size
/// per-attribute arrays kept by the brush, see [`Attribute::slot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    /// Event origin time, epoch milliseconds. Ordinal only.
    Time = 0,
    Latitude = 1,
    Longitude = 2,
    /// Hypocentral depth in km, positive down.
    Depth = 3,
    Magnitude = 4,
}

impl Attribute {
    pub const COUNT: usize = 5;
    pub const ALL: [Attribute; Attribute::COUNT] = [
        Attribute::Time,
        Attribute::Latitude,
        Attribute::Longitude,
        Attribute::Depth,
        Attribute::Magnitude,
    ];
    pub fn slot(self) -> usize {
        self as usize
    }
    pub fn name(self) -> &'static str {
        match self {
            Attribute::Time => "time",
            Attribute::Latitude => "latitude",
            Attribute::Longitude => "longitude",
            Attribute::Depth => "depth",
            Attribute::Magnitude => "magnitude",
        }
    }
}
impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
impl FromStr for Attribute {
    type Err = BrushError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| BrushError::Parse(format!("unknown attribute '{}'", s)))
    }
}

// ------------- Bound -------------
/// Which end of an attribute's accepted range a caller is moving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bound {
    Low,
    High,
}
impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Bound::Low => write!(f, "low"),
            Bound::High => write!(f, "high"),
        }
    }
}

// ------------- Limits -------------
/// Closed interval `[min, max]` of admissible values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}
impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
    // NaN compares false on both sides and is never admitted
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const LAT_SPAN: Span = Span::new(-90.0, 90.0);
// longitudes may be expressed either side of the antimeridian
pub const LON_SPAN: Span = Span::new(-180.0, 360.0);
pub const DEPTH_SPAN: Span = Span::new(-5.0, 700.0);
pub const MAG_SPAN: Span = Span::new(-2.0, 10.0);
pub const TIME_SPAN: Span = Span::new(f64::MIN, f64::MAX);

/// Domain limits for every attribute.
///
/// The same `Limits` value validates catalog data at ingest and the bound
/// values proposed to a brush built from that catalog, so the two checks can
/// not drift apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    pub time: Span,
    pub latitude: Span,
    pub longitude: Span,
    pub depth: Span,
    pub magnitude: Span,
}
impl Default for Limits {
    fn default() -> Self {
        Self {
            time: TIME_SPAN,
            latitude: LAT_SPAN,
            longitude: LON_SPAN,
            depth: DEPTH_SPAN,
            magnitude: MAG_SPAN,
        }
    }
}
impl Limits {
    pub fn span(&self, attribute: Attribute) -> Span {
        match attribute {
            Attribute::Time => self.time,
            Attribute::Latitude => self.latitude,
            Attribute::Longitude => self.longitude,
            Attribute::Depth => self.depth,
            Attribute::Magnitude => self.magnitude,
        }
    }
    pub fn admits(&self, attribute: Attribute, value: f64) -> bool {
        self.span(attribute).contains(value)
    }
}
