use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use quakebrush::brush::Brush;
use quakebrush::catalog::{Catalog, ColumnCatalog};
use quakebrush::error::{BrushError, Result};
use quakebrush::interface::BrushInterface;
use quakebrush::server;
use quakebrush::settings::Settings;

/// Serves a brush over an earthquake catalog.
#[derive(Parser, Debug)]
#[command(name = "quakebrush", version)]
struct Cli {
    /// Settings file (toml, json, yaml, ...)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Column-oriented JSON catalog, overrides catalog.path
    #[arg(long)]
    catalog: Option<PathBuf>,
    /// Listen address, overrides server.bind
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        error!(%e, "quakebrush stopped");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path = cli
        .catalog
        .or(settings.catalog.path.clone())
        .ok_or_else(|| BrushError::Config("no catalog given, use --catalog or catalog.path".into()))?;
    let catalog = ColumnCatalog::from_path(&path, settings.limits.clone())?;
    info!(path = %path.display(), events = catalog.size(), "catalog loaded");
    let brush = Brush::new(&catalog)?;
    let bind = cli.bind.unwrap_or(settings.server.bind);
    server::serve(&bind, Arc::new(BrushInterface::new(brush))).await
}
