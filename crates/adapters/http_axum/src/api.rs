//! JSON API handlers exposing resolved links.

#[allow(clippy::missing_errors_doc)]
pub mod services;

use axum::Router;
use axum::routing::get;

use osmlinks_app::ports::PreferenceStore;

use crate::state::AppState;

/// Build the `/api` sub-router.
pub fn routes<P>() -> Router<AppState<P>>
where
    P: PreferenceStore + Send + Sync + 'static,
{
    Router::new()
        .route("/services", get(services::list::<P>))
        .route("/services/{id}", get(services::get::<P>))
}
