//! # osmlinks-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **server-side-rendered directory page** that works with
//!   **zero JavaScript**: the request query string plays the role of the
//!   address-bar fragment (`?map=14/39.9524/-75.1636&filter=edit`)
//! - Persist preference toggles submitted from the page (PRG pattern)
//! - Serve a small **JSON API** exposing resolved links
//! - Render the same page to a string for static output
//!
//! ## Dependency rule
//! Depends on `osmlinks-app` (for port traits and services) and `osmlinks-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod error;
pub mod page;
pub mod router;
pub mod state;
