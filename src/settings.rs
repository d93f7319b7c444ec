//! Layered settings: an optional file, then `QUAKEBRUSH__*` environment
//! variables, e.g. `QUAKEBRUSH__SERVER__BIND=0.0.0.0:7878` or
//! `QUAKEBRUSH__LIMITS__DEPTH__MAX=800`.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::attribute::Limits;
use crate::error::Result;

pub const ENV_PREFIX: &str = "QUAKEBRUSH";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub limits: Limits,
    pub server: ServerSettings,
    pub log: LogSettings,
    pub catalog: CatalogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}
impl Default for ServerSettings {
    fn default() -> Self {
        Self { bind: String::from("127.0.0.1:7878") }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Default `tracing` filter directive, `RUST_LOG` takes precedence.
    pub filter: String,
}
impl Default for LogSettings {
    fn default() -> Self {
        Self { filter: String::from("info") }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    pub path: Option<PathBuf>,
}

impl Settings {
    /// Loads settings from `path` (any format `config` understands, picked by
    /// extension) if given, overlaid with environment variables. A missing
    /// file is an error, missing keys fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__").try_parsing(true))
            .build()?
            .try_deserialize::<Settings>()?;
        Ok(settings)
    }
}
