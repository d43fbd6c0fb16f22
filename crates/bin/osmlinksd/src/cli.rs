//! Command-line interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "osmlinksd", about = "Directory of OpenStreetMap-related services")]
pub struct Cli {
    /// Config file (defaults to `osmlinks.toml` when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Catalog file, overriding the configured one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the directory over HTTP (default)
    Serve,
    /// Render the directory page once
    Render {
        /// Viewport as zoom/lat/lon, e.g. 14/39.9524/-75.1636
        #[arg(long)]
        map: Option<String>,
        /// Only list services whose name or category contains this text
        #[arg(long, default_value = "")]
        filter: String,
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Check a catalog file for schema problems
    Validate {
        /// Catalog to check (defaults to the configured one)
        path: Option<PathBuf>,
    },
}
