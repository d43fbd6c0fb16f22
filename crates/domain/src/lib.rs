//! # osmlinks-domain
//!
//! Pure domain model for the osmlinks service directory.
//!
//! ## Responsibilities
//! - Foundational types: error conventions, category labels
//! - Define the **raw catalog** as decoded from `services.json`
//! - **Normalize** the raw catalog into services and styles with inherited
//!   URL templates, grouped by category
//! - Hold the **parameter set** (viewport and other substitution values)
//! - **Resolve** a definition's URL template against the parameter set
//! - Define user **preferences**
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;

pub mod catalog;
pub mod category;
pub mod normalize;
pub mod params;
pub mod prefs;
pub mod template;
