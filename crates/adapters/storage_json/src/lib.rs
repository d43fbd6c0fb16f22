//! # osmlinks-adapter-storage-json
//!
//! File persistence adapter backed by plain JSON documents.
//!
//! ## Responsibilities
//! - Implement `CatalogSource` by reading `services.json`
//! - Implement `PreferenceStore` with a small JSON file (the server-side
//!   counterpart of browser local storage)
//! - Map IO and decoding failures into domain errors
//!
//! ## Dependency rule
//! Depends on `osmlinks-app` (for port traits) and `osmlinks-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod catalog_file;
pub mod error;
pub mod prefs_file;

pub use catalog_file::JsonCatalogFile;
pub use prefs_file::JsonPreferenceFile;
