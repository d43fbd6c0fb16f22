//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`OsmLinksError`] via `#[from]` or an explicit `From` impl.

/// Top-level error shared by the application and adapter layers.
#[derive(Debug, thiserror::Error)]
pub enum OsmLinksError {
    /// The catalog violates a domain invariant.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A requested definition does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// Reading or writing an external resource failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Catalog invariant violations detected while normalizing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A service entry has no usable `name`.
    #[error("service `{service}` is missing a name")]
    MissingName {
        /// Catalog key of the offending service.
        service: String,
    },

    /// A style entry has no usable `name`.
    #[error("style `{style}` of service `{service}` is missing a name")]
    MissingStyleName {
        /// Catalog key of the parent service.
        service: String,
        /// Key of the offending style.
        style: String,
    },

    /// A service id contains characters that cannot be used as an HTML id.
    #[error("service id `{0}` must not be empty or contain whitespace")]
    InvalidId(String),
}

/// A lookup by id found nothing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} `{id}` not found")]
pub struct NotFoundError {
    /// What was being looked up (e.g. "Definition").
    pub kind: &'static str,
    /// The id that was requested.
    pub id: String,
}
