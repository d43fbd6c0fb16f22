//! # osmlinksd: osmlinks daemon
//!
//! Composition root that wires all adapters together.
//!
//! ## Responsibilities
//! - Parse configuration (CLI args, env vars, config file)
//! - Install the `tracing` subscriber
//! - Load and normalize the service catalog, failing loudly when it is broken
//! - Construct the preference store and application services
//! - Either serve the directory over HTTP (with graceful shutdown on
//!   SIGINT), render it once to a file, or validate a catalog
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod cli;
mod config;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use osmlinks_adapter_http_axum::state::AppState;
use osmlinks_adapter_storage_json::{JsonCatalogFile, JsonPreferenceFile};
use osmlinks_app::services::catalog_service::CatalogService;
use osmlinks_app::services::directory_service::DirectoryService;
use osmlinks_domain::normalize::Catalog;
use osmlinks_domain::params::MAP_KEY;

use crate::cli::{Cli, Command};
use crate::config::Config;

/// Failures reported by a command rather than by a lower layer.
#[derive(Debug, thiserror::Error)]
enum CommandError {
    #[error("catalog {} has {count} problem(s)", path.display())]
    InvalidCatalog { path: PathBuf, count: usize },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(catalog) = cli.catalog {
        config.catalog.path = catalog;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(&config).await,
        Command::Render {
            map,
            filter,
            output,
        } => render(&config, map.as_deref(), &filter, output.as_deref()).await,
        Command::Validate { path } => {
            validate(path.as_deref().unwrap_or(&config.catalog.path)).await
        }
    }
}

async fn load_catalog(path: &Path) -> Result<Catalog, Box<dyn std::error::Error>> {
    let catalog = CatalogService::new(JsonCatalogFile::new(path))
        .load()
        .await
        .map_err(|err| {
            tracing::error!(path = %path.display(), error = ?err, "failed to load catalog");
            err
        })?;
    Ok(catalog)
}

async fn serve(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(&config.catalog.path).await?;
    let prefs = JsonPreferenceFile::new(&config.preferences.path);

    let state = AppState::new(DirectoryService::new(catalog, prefs));
    let app = osmlinks_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "osmlinksd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("osmlinksd stopped");
    Ok(())
}

async fn render(
    config: &Config,
    map: Option<&str>,
    filter: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = load_catalog(&config.catalog.path).await?;
    let prefs = JsonPreferenceFile::new(&config.preferences.path);
    let service = DirectoryService::new(catalog, prefs);

    let fragment = map.map(|map| format!("{MAP_KEY}={map}")).unwrap_or_default();
    let session = service.state_for(&fragment, filter).await;
    if map.is_some() && session.params.viewport().is_none() {
        tracing::warn!(map, "ignoring malformed viewport");
    }

    let html = osmlinks_adapter_http_axum::page::render(&service.render(&session), false)?;
    match output {
        Some(path) => {
            tokio::fs::write(path, html).await?;
            tracing::info!(path = %path.display(), "directory rendered");
        }
        None => println!("{html}"),
    }
    Ok(())
}

async fn validate(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let problems = CatalogService::new(JsonCatalogFile::new(path))
        .check()
        .await?;
    if problems.is_empty() {
        println!("{} looks okay", path.display());
        return Ok(());
    }
    for problem in &problems {
        println!("{}: {problem}", path.display());
    }
    Err(CommandError::InvalidCatalog {
        path: path.to_path_buf(),
        count: problems.len(),
    }
    .into())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
