
use thiserror::Error;

use crate::attribute::Attribute;

#[derive(Error, Debug)]
pub enum BrushError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Catalog error: {0}")]
    Catalog(String),
    #[error("Catalog has no {0} column")]
    MissingAttribute(Attribute),
    #[error("Catalog is empty or has no brushable attributes")]
    EmptyCatalog,
    #[error("I/O error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Lock poisoned: {0}")]
    Lock(String),
}

pub type Result<T> = std::result::Result<T, BrushError>;

// Helper conversions
impl From<config::ConfigError> for BrushError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
impl From<std::io::Error> for BrushError {
    fn from(e: std::io::Error) -> Self { Self::Io(e.to_string()) }
}
impl From<serde_json::Error> for BrushError {
    fn from(e: serde_json::Error) -> Self { Self::Parse(e.to_string()) }
}
