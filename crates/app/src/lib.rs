//! # osmlinks-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CatalogSource`: fetch the raw service catalog
//!   - `PreferenceStore`: load & save display preferences
//! - Define **driving/inbound** use-cases:
//!   - `CatalogService`: fetch and normalize the catalog
//!   - `DirectoryService`: resolve links and build the directory view
//! - Hold the explicit per-session **state** (parameters, preferences, filter)
//! - Build the **view model** consumed by renderers
//!
//! ## Dependency rule
//! Depends on `osmlinks-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
pub mod state;
pub mod view;
